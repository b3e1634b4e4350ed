pub(crate) mod gif;
pub(crate) mod palette;
