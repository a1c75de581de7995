mod platform;

fn main() -> anyhow::Result<()> {
    platform::run_app(std::env::args().nth(1))
}
