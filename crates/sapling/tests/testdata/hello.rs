use fmt;

fn main() {
    fmt.Println("hello, world");
}

// Output:
// hello, world
