use fmt;

fn main() {
    let msg = "before";
    fmt.Println(msg, "!!");
    {
        let msg = "shadow";
        fmt.Println("**", msg, "**");
    }
    fmt.Println(msg, "!!");
    msg = "after";
    fmt.Println(msg, "!!");
}

// Output:
// before !!
// ** shadow **
// before !!
// after !!
