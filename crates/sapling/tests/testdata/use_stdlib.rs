use std::fmt;
use std::strings;

fn main() {
    let greeting = "hello, " + "world";
    fmt.Println(strings.ToUpper(greeting));
}

// Output:
// HELLO, WORLD
