//! Core handle types and the per-kind tables behind the registry.

mod table;
mod types;

pub(crate) use self::table::HandleEntry;
pub(crate) use self::table::HandleStore;
pub(crate) use self::table::TypeRecord;
pub(crate) use self::table::TypeSlot;
pub(crate) use self::table::TypeTable;

pub use self::types::Destructor;
pub use self::types::Handle;
pub use self::types::IntoAny;
pub use self::types::Kind;
pub use self::types::Resource;
