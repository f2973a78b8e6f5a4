//! The [`Handler`] trait every chain step implements, and the inbound conversion seam.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse};
use crate::core::error::Result;

/// Turns a transport update (e.g. a teloxide message) into a core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One step of the chain. Every hook has a no-op default, so a handler only implements the
/// phases it cares about: logging uses `before`/`after`, the relay only `handle`.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Name used in chain logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returning false drops the message: no `handle`, no `after`.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Sees the response that ended the handle phase (`Continue` if none did).
    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
