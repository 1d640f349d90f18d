use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notices::dtos::{
    CreateNoticeDto, NoticeQueryParams, NoticeResponseDto, UpdateNoticeDto,
};
use crate::features::notices::models::{Notice, NOTICE_COLUMNS};

/// Service for notice listing and management
pub struct NoticeService {
    pool: PgPool,
}

impl NoticeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List notices, pinned first then newest.
    ///
    /// With `published_only` unset, drafts are included (admin view).
    pub async fn list(
        &self,
        params: &NoticeQueryParams,
        published_only: bool,
    ) -> Result<(Vec<NoticeResponseDto>, i64)> {
        let pagination = params.pagination();
        let search = params.search_pattern();

        let filter = r#"
            WHERE ($1::BOOLEAN = FALSE OR is_published = TRUE)
              AND ($2::TEXT IS NULL OR title ILIKE $2 OR content ILIKE $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM notices {}", filter))
            .bind(published_only)
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        let notices = sqlx::query_as::<_, Notice>(&format!(
            r#"
            SELECT {}
            FROM notices
            {}
            ORDER BY is_pinned DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            NOTICE_COLUMNS, filter
        ))
        .bind(published_only)
        .bind(&search)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((notices.into_iter().map(Into::into).collect(), total))
    }

    /// Fetch a published notice and count the view in the same statement
    pub async fn view_published(&self, id: Uuid) -> Result<NoticeResponseDto> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"
            UPDATE notices
            SET view_count = view_count + 1
            WHERE id = $1 AND is_published = TRUE
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Notice not found".to_string()))?;

        Ok(notice.into())
    }

    pub async fn create(&self, dto: CreateNoticeDto) -> Result<NoticeResponseDto> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"
            INSERT INTO notices (title, content, is_pinned, is_published)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.is_pinned)
        .bind(dto.is_published)
        .fetch_one(&self.pool)
        .await?;

        info!("Notice created: id={}", notice.id);
        Ok(notice.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateNoticeDto) -> Result<NoticeResponseDto> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"
            UPDATE notices
            SET title = COALESCE($1, title),
                content = COALESCE($2, content),
                is_pinned = COALESCE($3, is_pinned),
                is_published = COALESCE($4, is_published),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.is_pinned)
        .bind(dto.is_published)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Notice not found".to_string()))?;

        info!("Notice updated: id={}", notice.id);
        Ok(notice.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notice not found".to_string()));
        }

        info!("Notice deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(title: &str, pinned: bool, published: bool) -> CreateNoticeDto {
        CreateNoticeDto {
            title: Some(title.to_string()),
            content: Some(format!("{} body", title)),
            is_pinned: pinned,
            is_published: published,
        }
    }

    fn query() -> NoticeQueryParams {
        NoticeQueryParams {
            page: 1,
            limit: 20,
            search: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_public_listing_hides_drafts_and_pins_first(pool: PgPool) {
        let service = NoticeService::new(pool);
        service.create(create_dto("older", false, true)).await.unwrap();
        service.create(create_dto("pinned", true, true)).await.unwrap();
        service.create(create_dto("draft", false, false)).await.unwrap();
        service.create(create_dto("newer", false, true)).await.unwrap();

        let (public, total) = service.list(&query(), true).await.unwrap();
        let titles: Vec<&str> = public.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["pinned", "newer", "older"]);
        assert_eq!(total, 3);

        let (all, total) = service.list(&query(), false).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(total, 4);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_view_counts_and_draft_is_hidden(pool: PgPool) {
        let service = NoticeService::new(pool);
        let published = service.create(create_dto("hello", false, true)).await.unwrap();
        let draft = service.create(create_dto("draft", false, false)).await.unwrap();

        service.view_published(published.id).await.unwrap();
        let viewed = service.view_published(published.id).await.unwrap();
        assert_eq!(viewed.view_count, 2);

        assert!(matches!(
            service.view_published(draft.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_partial_update_and_delete(pool: PgPool) {
        let service = NoticeService::new(pool);
        let notice = service.create(create_dto("hello", false, true)).await.unwrap();

        let updated = service
            .update(
                notice.id,
                UpdateNoticeDto {
                    is_pinned: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_pinned);
        assert_eq!(updated.title, "hello");

        service.delete(notice.id).await.unwrap();
        assert!(matches!(
            service.delete(notice.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
