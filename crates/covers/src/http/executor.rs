use async_trait::async_trait;

use super::{Request, Response, ResponseError};

#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, ResponseError>;
}
