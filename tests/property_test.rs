//! Property-based tests for the variable store, block linking and line
//! order.

mod common;
use common::*;
use gnalose::lang::ast::{Index, Operand, Reference};
use gnalose::mach::{Cell, Opcode, Program, Var};
use proptest::prelude::*;
use std::rc::Rc;

const SCALARS: usize = 4;
const SLOTS: usize = 3;
const CELLS: usize = SCALARS + SLOTS;

#[derive(Debug, Clone)]
enum Op {
    Bulk(i32, usize, Option<usize>),
    Store(usize, i32),
    Redefine(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i32>(), 0..CELLS, proptest::option::of(0..CELLS))
            .prop_map(|(amount, keep, also)| Op::Bulk(amount, keep, also)),
        (0..CELLS, any::<i32>()).prop_map(|(k, value)| Op::Store(k, value)),
        (0..SCALARS).prop_map(Op::Redefine),
    ]
}

fn scalar_name(k: usize) -> Rc<str> {
    format!("s{}", k).into()
}

fn cell(k: usize) -> Cell {
    if k < SCALARS {
        Cell::Scalar(scalar_name(k))
    } else {
        Cell::Element("arr".into(), k - SCALARS)
    }
}

fn operand(k: usize) -> Operand {
    if k < SCALARS {
        Operand::Reference(Reference::scalar(&scalar_name(k)))
    } else {
        Operand::Reference(Reference::element("arr", Index::Literal((k - SCALARS) as i32)))
    }
}

/// Nest `if`/`fi` pairs as written in source, top to bottom. A `true` opens
/// a block, a `false` closes the innermost one when there is one.
fn blocks(shape: &[bool]) -> (String, usize) {
    let mut lines = vec![];
    let mut depth = 0;
    let mut count = 0;
    for (n, &open) in shape.iter().enumerate() {
        if open || depth == 0 {
            lines.push(format!("if x{} equal to {}", n, n));
            depth += 1;
            count += 1;
        } else {
            lines.push("fi".to_string());
            depth -= 1;
        }
        lines.push("forget m".to_string());
    }
    for _ in 0..depth {
        lines.push("fi".to_string());
    }
    (lines.join("\n"), count)
}

proptest! {
    /// Lazy bulk updates read the same as touching every cell.
    #[test]
    fn prop_delta_matches_naive_model(ops in prop::collection::vec(op(), 1..40)) {
        let mut var = Var::new();
        for k in 0..SCALARS {
            var.define(&scalar_name(k));
        }
        var.dimension(&"arr".into(), SLOTS as i32).unwrap();
        let mut model = [0i32; CELLS];

        for op in ops {
            match op {
                Op::Bulk(amount, keep, also) => {
                    let also_cell = also.map(cell);
                    var.bulk_add(amount, &cell(keep), also_cell.as_ref()).unwrap();
                    for (k, value) in model.iter_mut().enumerate() {
                        if k != keep && Some(k) != also {
                            *value = value.wrapping_add(amount);
                        }
                    }
                }
                Op::Store(k, value) => {
                    var.store(&operand(k), value).unwrap();
                    model[k] = value;
                }
                Op::Redefine(k) => {
                    var.define(&scalar_name(k));
                    model[k] = 0;
                }
            }
            for (k, expected) in model.iter().enumerate() {
                prop_assert_eq!(var.fetch(&operand(k)).unwrap(), *expected);
            }
        }
    }

    /// Every conditional is linked to exactly one end, and blocks never
    /// cross.
    #[test]
    fn prop_blocks_link_well_nested(shape in prop::collection::vec(any::<bool>(), 0..30)) {
        let (source, count) = blocks(&shape);
        let program = Program::compile(&source).unwrap();
        let pairs: Vec<(usize, usize)> = program.link().iter().collect();
        prop_assert_eq!(pairs.len(), count);
        for &(start, end) in pairs.iter() {
            prop_assert!(start < end);
            prop_assert!(program.instructions()[start].opcode().is_conditional());
            prop_assert_eq!(program.instructions()[end].opcode(), Opcode::EndIf);
        }
        for &(s1, e1) in pairs.iter() {
            for &(s2, e2) in pairs.iter() {
                let disjoint = e1 < s2 || e2 < s1;
                let nested = (s1 <= s2 && e2 <= e1) || (s2 <= s1 && e1 <= e2);
                prop_assert!(disjoint || nested, "{:?} crosses {:?}", (s1, e1), (s2, e2));
            }
        }
        let mut ends: Vec<usize> = pairs.iter().map(|&(_, end)| end).collect();
        ends.sort();
        ends.dedup();
        prop_assert_eq!(ends.len(), count);
    }

    /// Output order is the reverse of the non-blank source lines, whatever
    /// the comments and blank lines around them.
    #[test]
    fn prop_lines_run_bottom_up(
        lines in prop::collection::vec((32u8..127, 0u8..3, any::<bool>()), 0..20),
    ) {
        let mut source = vec![];
        for &(c, form, blank_after) in lines.iter() {
            let code = format!("read as number to {}", c);
            source.push(match form {
                0 => code,
                1 => format!("emit {} / {}", c, code),
                _ => format!("note /{}/ trailing {}", code, c),
            });
            if blank_after {
                let filler = if c % 2 == 0 { "" } else { "just a comment /" };
                source.push(filler.to_string());
            }
        }
        let expected: Vec<String> = lines
            .iter()
            .rev()
            .map(|&(c, _, _)| char::from(c).to_string())
            .collect();
        prop_assert_eq!(output(&source.join("\n"), &[]), expected);
    }
}
