use fmt;

fn F(n: i64) -> i64 {
    return G(n) + G(n) + 10;
}

fn G(n: i64) -> i64 {
    return n + 10;
}

fn H(s: String, n: i64) {
    fmt.Println(s, n);
}

fn main() {
    fmt.Println(F(10));
    H("H", 100);
}

// Output:
// 50
// H 100
