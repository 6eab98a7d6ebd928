use crate::error;
use crate::lang::ast::{Index, Operand, Reference};
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub const MAX_ARRAY_LEN: usize = 1 << 16;

/// ## Variable memory
///
/// Scalars and array slots share one running offset, `delta`. The value a
/// program sees is always `stored + delta`, so adding to every cell at once
/// is a single change to `delta`. Cells that must not change are
/// compensated individually. All arithmetic wraps at 32 bits.

#[derive(Debug, Default, Clone)]
pub struct Var {
    scalars: HashMap<Rc<str>, i32>,
    arrays: HashMap<Rc<str>, Vec<i32>>,
    delta: i32,
}

/// A single storage slot, already checked to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Scalar(Rc<str>),
    Element(Rc<str>, usize),
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.scalars.clear();
        self.arrays.clear();
        self.delta = 0;
    }

    pub fn delta(&self) -> i32 {
        self.delta
    }

    /// Create or reset a scalar so that it reads as zero.
    pub fn define(&mut self, name: &Rc<str>) {
        let zero = self.zero();
        self.scalars.insert(name.clone(), zero);
    }

    /// Create or reset an array of `len` slots, each reading as zero.
    pub fn dimension(&mut self, name: &Rc<str>, len: i32) -> Result<()> {
        if len < 0 {
            return Err(error!(IllegalArraySize; format!("{}[{}]", name, len)));
        }
        let len = len as usize;
        if len > MAX_ARRAY_LEN {
            return Err(error!(OutOfMemory; format!(
                "{}[{}] exceeds the limit of {} slots",
                name, len, MAX_ARRAY_LEN
            )));
        }
        let zero = self.zero();
        self.arrays.insert(name.clone(), vec![zero; len]);
        Ok(())
    }

    pub fn undefine(&mut self, name: &str) {
        self.scalars.remove(name);
    }

    pub fn undefine_array(&mut self, name: &str) {
        self.arrays.remove(name);
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.arrays.is_empty()
    }

    /// Names still defined, scalars first, each group sorted.
    pub fn names(&self) -> Vec<String> {
        let mut scalars: Vec<String> = self.scalars.keys().map(|k| k.to_string()).collect();
        let mut arrays: Vec<String> = self.arrays.keys().map(|k| format!("{}[]", k)).collect();
        scalars.sort();
        arrays.sort();
        scalars.append(&mut arrays);
        scalars
    }

    /// Apparent value of an operand.
    pub fn fetch(&self, operand: &Operand) -> Result<i32> {
        match operand {
            Operand::Literal(n) => Ok(*n),
            Operand::Reference(r) => {
                let cell = self.locate(r)?;
                Ok(self.stored(&cell)?.wrapping_add(self.delta))
            }
        }
    }

    /// Make an operand read as `value`.
    pub fn store(&mut self, operand: &Operand, value: i32) -> Result<()> {
        let cell = self.locate_operand(operand)?;
        let stored = value.wrapping_sub(self.delta);
        *self.stored_mut(&cell)? = stored;
        Ok(())
    }

    pub fn locate_operand(&self, operand: &Operand) -> Result<Cell> {
        match operand {
            Operand::Literal(n) => Err(error!(AssignToLiteral; n.to_string())),
            Operand::Reference(r) => self.locate(r),
        }
    }

    /// Resolve a reference to its slot. Subscripts read the apparent value
    /// of their scalar.
    pub fn locate(&self, reference: &Reference) -> Result<Cell> {
        let name = &reference.name;
        match &reference.index {
            None => {
                if self.scalars.contains_key(name) {
                    Ok(Cell::Scalar(name.clone()))
                } else {
                    Err(error!(UndefinedVariable; name.to_string()))
                }
            }
            Some(index) => {
                let len = match self.arrays.get(name) {
                    Some(arr) => arr.len(),
                    None => return Err(error!(UndefinedArray; name.to_string())),
                };
                let index = self.subscript(index)?;
                if index < 0 || index as usize >= len {
                    return Err(error!(IndexOutOfRange; format!(
                        "index {} of {}, length {}",
                        index, name, len
                    )));
                }
                Ok(Cell::Element(name.clone(), index as usize))
            }
        }
    }

    pub fn subscript(&self, index: &Index) -> Result<i32> {
        match index {
            Index::Literal(n) => Ok(*n),
            Index::Scalar(name) => self.fetch(&Operand::Reference(Reference {
                name: name.clone(),
                index: None,
            })),
        }
    }

    /// Add `amount` to every cell except `keep` and `also_keep`.
    ///
    /// Constant time in the number of live cells. When both exclusions name
    /// the same slot it is compensated once.
    pub fn bulk_add(&mut self, amount: i32, keep: &Cell, also_keep: Option<&Cell>) -> Result<()> {
        self.compensate(keep, amount)?;
        if let Some(other) = also_keep {
            if other != keep {
                self.compensate(other, amount)?;
            }
        }
        self.delta = self.delta.wrapping_add(amount);
        Ok(())
    }

    fn compensate(&mut self, cell: &Cell, amount: i32) -> Result<()> {
        let stored = self.stored_mut(cell)?;
        *stored = stored.wrapping_sub(amount);
        Ok(())
    }

    fn zero(&self) -> i32 {
        0i32.wrapping_sub(self.delta)
    }

    fn stored(&self, cell: &Cell) -> Result<i32> {
        let stored = match cell {
            Cell::Scalar(name) => self.scalars.get(name),
            Cell::Element(name, index) => self.arrays.get(name).and_then(|arr| arr.get(*index)),
        };
        stored.copied().ok_or_else(|| stale(cell))
    }

    fn stored_mut(&mut self, cell: &Cell) -> Result<&mut i32> {
        let stored = match cell {
            Cell::Scalar(name) => self.scalars.get_mut(name),
            Cell::Element(name, index) => self
                .arrays
                .get_mut(name)
                .and_then(|arr| arr.get_mut(*index)),
        };
        stored.ok_or_else(|| stale(cell))
    }
}

fn stale(cell: &Cell) -> Error {
    error!(InternalError; format!("STALE CELL {:?}", cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn scalar(name: &str) -> Operand {
        Operand::Reference(Reference::scalar(name))
    }

    fn element(name: &str, index: i32) -> Operand {
        Operand::Reference(Reference::element(name, Index::Literal(index)))
    }

    #[test]
    fn test_define_reads_zero_after_delta() {
        let mut v = Var::new();
        v.define(&"a".into());
        v.bulk_add(7, &Cell::Scalar("a".into()), None).unwrap();
        v.define(&"b".into());
        v.dimension(&"c".into(), 2).unwrap();
        assert_eq!(v.delta(), 7);
        assert_eq!(v.fetch(&scalar("a")).unwrap(), 0);
        assert_eq!(v.fetch(&scalar("b")).unwrap(), 0);
        assert_eq!(v.fetch(&element("c", 1)).unwrap(), 0);
    }

    #[test]
    fn test_bulk_excludes() {
        let mut v = Var::new();
        for n in &["a", "b", "c"] {
            v.define(&(*n).into());
        }
        v.store(&scalar("a"), 10).unwrap();
        v.bulk_add(5, &Cell::Scalar("b".into()), Some(&Cell::Scalar("a".into())))
            .unwrap();
        assert_eq!(v.fetch(&scalar("a")).unwrap(), 10);
        assert_eq!(v.fetch(&scalar("b")).unwrap(), 0);
        assert_eq!(v.fetch(&scalar("c")).unwrap(), 5);
    }

    #[test]
    fn test_same_cell_compensated_once() {
        let mut v = Var::new();
        v.define(&"a".into());
        v.define(&"b".into());
        let a = Cell::Scalar("a".into());
        v.bulk_add(3, &a, Some(&a.clone())).unwrap();
        assert_eq!(v.fetch(&scalar("a")).unwrap(), 0);
        assert_eq!(v.fetch(&scalar("b")).unwrap(), 3);
    }

    #[test]
    fn test_subscript_by_scalar() {
        let mut v = Var::new();
        v.define(&"i".into());
        v.dimension(&"arr".into(), 4).unwrap();
        v.store(&scalar("i"), 2).unwrap();
        let r = Operand::Reference(Reference::element("arr", Index::Scalar("i".into())));
        v.store(&r, 42).unwrap();
        assert_eq!(v.fetch(&element("arr", 2)).unwrap(), 42);
        v.bulk_add(1, &Cell::Element("arr".into(), 2), None).unwrap();
        assert_eq!(v.locate(r.reference().unwrap()).unwrap(), Cell::Element("arr".into(), 3));
    }

    #[test]
    fn test_errors() {
        let mut v = Var::new();
        assert_eq!(v.fetch(&scalar("x")).unwrap_err().code(), ErrorCode::UndefinedVariable);
        assert_eq!(v.fetch(&element("x", 0)).unwrap_err().code(), ErrorCode::UndefinedArray);
        v.dimension(&"x".into(), 3).unwrap();
        let e = v.fetch(&element("x", 3)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::IndexOutOfRange);
        assert_eq!(e.detail(), "index 3 of x, length 3");
        assert_eq!(v.fetch(&element("x", -1)).unwrap_err().code(), ErrorCode::IndexOutOfRange);
        assert_eq!(v.store(&Operand::Literal(1), 2).unwrap_err().code(), ErrorCode::AssignToLiteral);
        assert_eq!(v.dimension(&"y".into(), -1).unwrap_err().code(), ErrorCode::IllegalArraySize);
        assert_eq!(
            v.dimension(&"y".into(), MAX_ARRAY_LEN as i32 + 1).unwrap_err().code(),
            ErrorCode::OutOfMemory
        );
    }

    #[test]
    fn test_wrapping() {
        let mut v = Var::new();
        v.define(&"a".into());
        v.define(&"k".into());
        v.store(&scalar("a"), i32::MAX).unwrap();
        v.bulk_add(1, &Cell::Scalar("k".into()), None).unwrap();
        assert_eq!(v.fetch(&scalar("a")).unwrap(), i32::MIN);
    }

    #[test]
    fn test_names() {
        let mut v = Var::new();
        v.define(&"z".into());
        v.define(&"b".into());
        v.dimension(&"a".into(), 1).unwrap();
        assert_eq!(v.names(), ["b", "z", "a[]"]);
        v.undefine("z");
        v.undefine("z");
        v.undefine("b");
        v.undefine_array("a");
        assert!(v.is_empty());
    }
}
