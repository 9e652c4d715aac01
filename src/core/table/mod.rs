//! Per-kind storage behind the registry.

mod type_table;

pub(crate) use self::type_table::HandleEntry;
pub(crate) use self::type_table::HandleStore;
pub(crate) use self::type_table::TypeRecord;
pub(crate) use self::type_table::TypeSlot;
pub(crate) use self::type_table::TypeTable;
