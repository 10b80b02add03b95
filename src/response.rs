use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub count: Option<usize>,
    pub limit: Option<i64>,
    pub has_more: Option<bool>,
}

impl Meta {
    pub fn page(count: usize, limit: i64, has_more: bool) -> Self {
        Self {
            count: Some(count),
            limit: Some(limit),
            has_more: Some(has_more),
        }
    }

    pub fn count(count: usize) -> Self {
        Self {
            count: Some(count),
            limit: None,
            has_more: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            count: None,
            limit: None,
            has_more: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
