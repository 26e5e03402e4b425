pub(crate) mod progressive;
pub(crate) mod store;
