pub(crate) mod logo;
pub(crate) mod object_url;
pub(crate) mod raster;
