use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Init,
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(long)]
        open: bool,
    },
    Generate {
        #[clap(short, long)]
        owner: Option<String>,
        #[clap(short, long)]
        repo: Option<String>,
        #[clap(long)]
        per_page: Option<u32>,
        #[clap(long, default_value_t = 1)]
        pages: u32,
        #[clap(short, long)]
        batch_size: Option<usize>,
    },
}
