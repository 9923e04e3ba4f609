// mutest: runs the harness's own unit tests.
// Usage: mutest [-v]... [--show-failures] [--color auto|always|never]

fn main() {
    mutest::cli::run();
}
