pub(crate) mod trigger;
