fn main() -> anyhow::Result<()> {
    duotone::cli::run()
}
