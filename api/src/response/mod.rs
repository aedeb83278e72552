use serde::Serialize;

/// JSON envelope returned by every endpoint.
///
/// ```json
/// { "success": true, "data": { "session_id": 4 }, "message": "Scan recorded" }
/// ```
///
/// Errors carry `success: false` and a default `data` value.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error response; `data` is `T::default()`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Placeholder payload for responses without data. Serializes as `null`.
#[derive(Serialize, Default, Debug)]
pub struct Empty;
