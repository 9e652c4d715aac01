//! Handle codec and the types stored behind handles.

mod handle;
mod kind;
mod resource;

pub use self::handle::Handle;
pub use self::kind::Kind;
pub use self::resource::Destructor;
pub use self::resource::IntoAny;
pub use self::resource::Resource;
