//! Command dispatch against a ledger transport.

use coldtrace_ledger_state::{IndexManager, LedgerTransport, LifecycleEngine, QueryEngine};
use coldtrace_ledger_types::{CodecError, PackageRecord, Result, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::command::Command;

/// Reply to a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// The command succeeded and produced no data.
    Ack,
    /// The raw index contents.
    Ids(Vec<String>),
    /// A single record: point queries and every mutation, which answers
    /// with the state it just committed.
    Record(PackageRecord),
    /// A filtered scan, in creation order.
    Records(Vec<PackageRecord>),
}

impl Response {
    /// Transport-neutral encoding of the reply.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if serialization fails.
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, CodecError> {
        encode(self)
    }
}

/// Routes parsed commands to the state layer.
///
/// Stateless between calls: the engines are rebuilt per invocation, so no
/// record or index data survives outside the transport.
pub struct Dispatcher<T: LedgerTransport> {
    transport: T,
}

impl<T: LedgerTransport> Dispatcher<T> {
    /// Creates a dispatcher owning the given transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrows the underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes one command as one ledger invocation.
    ///
    /// # Errors
    ///
    /// Propagates the state layer's errors unchanged; see the taxonomy on
    /// `LedgerError`.
    pub fn dispatch(&self, command: Command) -> Result<Response> {
        debug!(verb = command.verb(), "dispatching");

        let lifecycle = LifecycleEngine::new(&self.transport);
        let queries = QueryEngine::new(&self.transport);

        match command {
            Command::Init => {
                IndexManager::new(&self.transport).initialize()?;
                info!("package index initialized");
                Ok(Response::Ack)
            },
            Command::Create(package) => {
                let record = lifecycle.create(package)?;
                info!(id = %record.id, "package created");
                Ok(Response::Record(record))
            },
            Command::Accept { id, provider } => {
                let record = lifecycle.accept(&id, &provider)?;
                info!(id = %record.id, provider = %provider, "package accepted");
                Ok(Response::Record(record))
            },
            Command::RecordTemperature { id, reading } => {
                let record = lifecycle.record_temperature(&id, reading)?;
                info!(id = %record.id, reading, status = %record.status, "temperature recorded");
                Ok(Response::Record(record))
            },
            Command::Deliver { id, provider } => {
                let record = lifecycle.deliver(&id, &provider)?;
                info!(id = %record.id, provider = %provider, "package delivered");
                Ok(Response::Record(record))
            },
            Command::QueryById { id } => Ok(Response::Record(queries.by_id(&id)?)),
            Command::QueryAllIds => Ok(Response::Ids(queries.all_ids()?)),
            Command::QueryAll => Ok(Response::Records(queries.all()?)),
            Command::QueryByStatus { status } => {
                Ok(Response::Records(queries.by_status(status)?))
            },
            Command::QueryByRole { role, value } => {
                Ok(Response::Records(queries.by_role(role, &value)?))
            },
            Command::QueryByRoleAndStatus { role, value, status } => {
                Ok(Response::Records(queries.by_role_and_status(role, &value, status)?))
            },
        }
    }
}
