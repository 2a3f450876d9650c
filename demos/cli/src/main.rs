use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use feedback_core::FeedbackConfig;
use feedback_scorecard::build_scorecard_str;

#[derive(Parser, Debug)]
#[command(
    name = "feedback-cli",
    about = "Xem trước scorecard tính từ file JSON kết quả phân tích."
)]
struct Args {
    /// Đường dẫn tới file JSON kết quả phân tích.
    #[arg(short, long)]
    input: PathBuf,

    /// Điểm tối đa thay cho giá trị mặc định của cấu hình.
    #[arg(long)]
    max_score: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;

    let mut config = FeedbackConfig::default();
    if let Some(max_score) = args.max_score {
        config.default_max_score = max_score;
    }

    let snapshot = build_scorecard_str(&data, &config)?;

    println!("Generated at: {}", snapshot.generated_at);
    if let Some(overall) = snapshot.overall_score {
        println!("Overall score: {overall}");
    }
    println!("Score bars: {}", snapshot.bars().len());

    for bar in snapshot.bars() {
        println!(
            "  {}: {}/{} -> {} [{}]",
            bar.label,
            bar.score,
            bar.max_score,
            bar.width,
            bar.tier.level()
        );
    }

    Ok(())
}
