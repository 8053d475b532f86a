//! Request-scoped gateway sessions.

use shared_types::OrgIndex;
use tracing::debug;

use crate::client::GatewayClient;
use crate::deadlines::CallDeadlines;

/// An authenticated, deadline-bounded connection to one organization.
///
/// Scoped to one request. The session exclusively owns the transport
/// handle; [`release`](Session::release) consumes the session, so it can
/// happen at most once, and ownership guarantees the channel is dropped on
/// every exit path whether or not release was called explicitly.
#[derive(Debug)]
pub struct Session {
    org: OrgIndex,
    client: GatewayClient,
    deadlines: CallDeadlines,
}

impl Session {
    pub(crate) fn new(org: OrgIndex, client: GatewayClient, deadlines: CallDeadlines) -> Self {
        Self {
            org,
            client,
            deadlines,
        }
    }

    /// Which organization this session is pinned to.
    pub fn org(&self) -> OrgIndex {
        self.org
    }

    /// The per-call deadline budgets attached at open time.
    pub fn deadlines(&self) -> CallDeadlines {
        self.deadlines
    }

    /// A client handle for issuing calls over this session's channel.
    pub fn client(&self) -> GatewayClient {
        self.client.clone()
    }

    /// Close the session and drop the transport handle.
    pub fn release(self) {
        debug!("[cg-02] session to {} released", self.org);
        drop(self.client);
    }
}
