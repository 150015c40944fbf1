use std::{fmt as f, strings as s};

fn main() {
    let name = s.TrimSpace("  sapling  ");
    f.Print(f.Sprintln(name));
    f.Println(s.Repeat("ab", 3), s.Contains(name, "pl"), s.HasSuffix(name, "ing"));
    f.Println(1.5 + 2.5, 1e21, f.Sprint(1, 2), f.Sprint("a", 1));
    f::Println("path form");
    println(false || true, true && false);
}

// Output:
// sapling
// ababab true true
// 4 1e+21 1 2 a1
// path form
// true false
