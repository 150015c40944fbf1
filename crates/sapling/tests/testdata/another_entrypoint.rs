use fmt;

fn Foo() {
    fmt.Println("Foo");
}

fn Bar() {
    fmt.Println("Bar");
}
