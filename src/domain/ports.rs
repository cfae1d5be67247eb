use crate::utils::error::Result;
use async_trait::async_trait;

/// Line-oriented terminal used by every session.
#[async_trait]
pub trait Console: Send {
    /// Prints `prompt` and waits for the next line. End of input yields `ArcadeError::InputClosed`.
    async fn read_line(&mut self, prompt: &str) -> Result<String>;

    fn say(&mut self, text: &str);

    fn blank(&mut self) {
        self.say("");
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Supplies candidate mystery words of at least `min_len` letters.
#[async_trait]
pub trait WordSupply: Send + Sync {
    fn describe(&self) -> &'static str;
    async fn words(&self, min_len: usize) -> Result<Vec<String>>;
}

#[async_trait]
pub trait Session: Send {
    fn name(&self) -> &'static str;
    async fn run(&mut self, console: &mut dyn Console) -> Result<()>;
}
