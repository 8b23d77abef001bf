//! The tag tree and its binary codec.
//!
//! The wire format is little-endian throughout:
//!
//! ```text
//! tag         = id:u8 ~ nameLen:u16 ~ name:u8{nameLen} ~ value
//! listElement = value
//!
//! value(byte)      = i8
//! value(short)     = i16
//! value(int)       = i32
//! value(long)      = i64
//! value(float)     = f32
//! value(double)    = f64
//! value(byteArray) = len:i32 ~ u8{len}
//! value(string)    = len:u16 ~ u8{len}
//! value(list)      = elementId:u8 ~ count:i32 ~ listElement{count}
//! value(compound)  = tag* ~ 0:u8
//! value(intArray)  = len:i32 ~ i32{len}
//! ```
//!
//! An empty list may declare element id `0`.

pub mod types;
pub mod tag;
pub mod enc;
pub mod dec;

pub use tag::{ Tag, Value, List, Compound };
pub use types::{ Kind, Text };
