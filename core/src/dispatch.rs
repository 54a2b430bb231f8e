use crate::router::RoutingContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Delivered,
    Failed,
}

impl DispatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchStatus::Delivered => "ok",
            DispatchStatus::Failed => "error",
        }
    }
}

/// Messaging collaborator: a single best-effort delivery, no retries.
#[allow(async_fn_in_trait)]
pub trait MessageSender {
    async fn send(&self, routing: &RoutingContext, text: &str) -> DispatchStatus;
}
