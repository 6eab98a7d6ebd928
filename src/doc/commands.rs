/*!
# Command Reference

Each line holds one command. `<name>` is a bare name, `<name>[<i>]` an
array slot whose subscript is a number or a scalar name, and `<value>` is
either of those or a number.

| Command | Effect |
|---|---|
| `undefine <name>` | create scalar `name`, reading zero |
| `undefine single <name>[<size>]` | create array `name` of `size` slots, each reading zero |
| `define <name>` | destroy scalar `name` |
| `define single <name>` | destroy array `name` |
| `read to <cell>` | write the value of `cell` as a number |
| `read as number to <value>` | write `value` as one character |
| `print <cell>` | read a number from input into `cell` |
| `sub <value> from <cell>` | add `value` to every cell except `cell` (and `value`) |
| `add <value> to <cell>` | subtract `value` from every cell except `cell` (and `value`) |
| `if <a> not equal to <b>` | run the block while `a` equals `b` |
| `if <a> equal to <b>` | run the block while `a` differs from `b` |
| `if <a> greater than <b>` | run the block while `a <= b` |
| `if <a> lower than <b>` | run the block while `a >= b` |
| `if <a> greater or equal than <b>` | run the block while `a < b` |
| `if <a> lower or equal than <b>` | run the block while `a > b` |
| `fi` | end of block |
| `unmark <name>` | set mark `name` just after this line |
| `mark <name>` | delete mark `name` |
| `forget <name>` | choose mark `name` as the target of `halt` |
| `halt` | jump to the chosen mark |

Destroying something that does not exist is not an error.

## Errors

Diagnostics name the phase, the forward line number, the line number counted
from the bottom, and the offending text.

| Message | Cause |
|---|---|
| `FI WITHOUT IF` | a `fi` with no open block |
| `IF WITHOUT FI` | an `if` never closed |
| `UNKNOWN COMMAND` | no command matches the line |
| `INSUFFICIENT WORDS` | a command is missing an operand |
| `LITERAL NOT ALLOWED` | a number where a name is required |
| `UNDEFINED VARIABLE`, `UNDEFINED ARRAY` | use before `undefine` |
| `SUBSCRIPT OUT OF RANGE` | array index outside `0..length` |
| `NOTHING REMEMBERED` | `halt` without a `forget` |
| `UNDEFINED MARK` | `halt` to a mark that does not exist |
| `LEFTOVER STATE` | variables, arrays or marks alive at the end |

*/
