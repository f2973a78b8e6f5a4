//! Outcome of one handler's `handle` step.

/// `Continue` and `Ignore` let the next handler run; `Stop` and `Reply` end the handle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    Continue,
    /// Handled, nothing sent (e.g. an unknown command).
    Stop,
    /// Not this handler's kind of message.
    Ignore,
    /// Text that was sent back to the chat; `after()` hooks see it.
    Reply(String),
}

impl HandlerResponse {
    /// True when no later handler should run `handle`.
    pub fn ends_chain(&self) -> bool {
        matches!(self, HandlerResponse::Stop | HandlerResponse::Reply(_))
    }

    pub fn reply_text(&self) -> Option<&str> {
        match self {
            HandlerResponse::Reply(text) => Some(text),
            _ => None,
        }
    }
}
