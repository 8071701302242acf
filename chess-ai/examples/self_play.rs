//! 自对弈演示
//!
//! 高难度白方对阵低难度黑方，打印每一步和搜索统计。
//!
//! 运行方式:
//! ```bash
//! cargo run -p chess-ai --example self_play
//! ```

use chess_ai::{AiConfig, AiEngine};
use chess_rules::{RulesEngine, StandardBoard};

fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut board = StandardBoard::start_pos();
    let mut white = AiEngine::with_seed(AiConfig::from_difficulty(4), 2024);
    let mut black = AiEngine::with_seed(AiConfig::from_difficulty(2), 2024);

    println!("=== 自对弈: 难度 4 (白) vs 难度 2 (黑) ===\n");

    for ply in 1..=100 {
        if board.is_checkmate() || board.is_draw() || board.legal_moves().is_empty() {
            break;
        }

        let engine = if ply % 2 == 1 { &mut white } else { &mut black };
        let mv = engine.select_move(&mut board)?;
        println!("{:3}. {}  ({} 节点)", ply, mv, engine.nodes_searched());
        board.apply_move(mv);
    }

    if board.is_checkmate() {
        println!("\n将死!");
    } else if board.is_draw() {
        println!("\n和棋");
    }
    println!("最终局面: {}", board.fen());
    Ok(())
}
