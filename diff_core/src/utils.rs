mod byte_size;

pub use byte_size::{byte_len, human_readable_size};
