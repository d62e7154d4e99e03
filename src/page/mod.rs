pub(crate) mod host;
pub(crate) mod static_page;
