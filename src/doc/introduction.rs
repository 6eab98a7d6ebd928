/*!
# Introductory Tutorial for gnalose

A gnalose program is read from the bottom up. The last line runs first and
the first line runs last. Every keyword means the reverse of its usual sense.

Here is a program that asks for a number and prints it back. Read it from
the bottom.

```text
define n
read to n
print n
undefine n
```

The bottom line, `undefine n`, creates the variable `n` holding zero.
`print n` then reads a number from the keyboard into `n`. `read to n` writes
it to the screen. Finally `define n` throws the variable away.

That last step is not optional. A program must destroy everything it creates
before it ends, or the run fails with `LEFTOVER STATE`.

## Comments

Text before the first `/` on a line is a comment. The code is whatever
follows it, up to a second `/` if there is one.

```text
greet the user / read as number to 72
```

## Arithmetic

There is no `x = x + 1`. Instead, `sub 5 from x` adds five to *every*
variable and array slot except `x`. `add 5 to x` subtracts five from every
cell except `x`. When the amount is itself a variable, that variable is
left alone too.

```text
define b
define a
read to b
read to a
sub 3 from a
undefine b
undefine a
```

This prints `0` for `a` and `3` for `b`.

## Blocks

`if a equal to b` ... `fi` runs its body while `a` is *not* equal to `b`.
Since everything runs bottom up, write the `if` above its body and the `fi`
below, as usual. The interpreter rearranges them for you.

## Jumps

`unmark loop` records the position just after itself under the name
`loop`. `forget loop` picks that mark as the jump target, and `halt` jumps
there. `mark loop` deletes the mark again.

*/
