pub(crate) mod admin;
pub(crate) mod controls;
pub(crate) mod overlay;
pub(crate) mod player;
pub(crate) mod table;
