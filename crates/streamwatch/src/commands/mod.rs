use async_trait::async_trait;
use eyre::Result;

pub mod auth;
pub mod serve;
pub mod streamers;

#[async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}
