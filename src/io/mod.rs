mod cursor;

pub use cursor::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteCursor};
