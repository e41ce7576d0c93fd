pub mod pagination;
pub mod props;
pub mod source;
