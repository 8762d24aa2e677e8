//! Qualification policy: genuine frame or coincidental marker match.

use schema::CommandTable;
use tracing::debug;
use wire::{Header, Transport};

/// Per-connection qualification state.
///
/// The datagram policy is stateless. The stream policy remembers the first
/// non-zero user id seen on a frame qualified through the command table and
/// from then on also accepts unknown commands carrying that user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// Qualifies iff the command is in the table.
    Datagram,
    /// Qualifies iff the command is in the table or the user id is bound.
    Stream {
        /// User id bound to this connection, if any.
        bound_user: Option<u32>,
    },
}

impl Qualifier {
    /// Creates the initial policy of a transport.
    #[must_use]
    pub const fn for_transport(transport: Transport) -> Self {
        match transport {
            Transport::Stream => Self::Stream { bound_user: None },
            Transport::Datagram => Self::Datagram,
        }
    }

    /// User id bound to the session, if any.
    #[must_use]
    pub const fn bound_user(&self) -> Option<u32> {
        match self {
            Self::Datagram => None,
            Self::Stream { bound_user } => *bound_user,
        }
    }

    /// Decides whether `header` starts a genuine frame, binding the session
    /// user on the stream transport when it does.
    pub fn qualifies(&mut self, header: &Header, table: &CommandTable) -> bool {
        let known = table.contains(header.command());
        match self {
            Self::Datagram => known,
            Self::Stream { bound_user } => {
                let user = header.user_id();
                let same_user = bound_user.is_some() && *bound_user == user;
                if !known && !same_user {
                    return false;
                }
                if bound_user.is_none() {
                    // Zero is the "no user" value and never binds.
                    if let Some(id) = user.filter(|id| *id != 0) {
                        debug!(user_id = id, command = header.command(), "bound session user");
                        *bound_user = Some(id);
                    }
                }
                true
            }
        }
    }
}
