//! C++ constant array literals, ready to paste into the renderer source.

use std::fmt;

/// Element type of an emitted array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    Int8,
    Int16,
    UInt8,
    UInt16,
}

impl CType {
    pub fn as_str(self) -> &'static str {
        match self {
            CType::Int8 => "int8_t",
            CType::Int16 => "int16_t",
            CType::UInt8 => "uint8_t",
            CType::UInt16 => "uint16_t",
        }
    }
}

/// `constexpr <ctype> <name>[] = {v0,v1,...};`
#[derive(Debug, Clone, Copy)]
pub struct CArray<'a, T> {
    pub ctype: CType,
    pub name: &'a str,
    pub values: &'a [T],
}

impl<'a, T> CArray<'a, T> {
    pub fn new(ctype: CType, name: &'a str, values: &'a [T]) -> Self {
        Self {
            ctype,
            name,
            values,
        }
    }
}

impl<T: fmt::Display> fmt::Display for CArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constexpr {} {}[] = {{", self.ctype.as_str(), self.name)?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("};")
    }
}
