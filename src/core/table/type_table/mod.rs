mod handle_entry;
mod handle_store;
mod table;
mod type_record;

pub(crate) use self::handle_entry::HandleEntry;
pub(crate) use self::handle_store::HandleStore;
pub(crate) use self::table::TypeSlot;
pub(crate) use self::table::TypeTable;
pub(crate) use self::type_record::TypeRecord;
