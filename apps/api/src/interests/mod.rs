//! Interests are shared tags: a many-to-many association with users and no
//! ownership direction. Attaching a name the platform already knows links the
//! existing row; detaching only ever removes the association.

pub mod handlers;
pub mod queries;
