// ==========================================
// 高校考勤系统 - 升级决策 CLI 主入口
// ==========================================
// 用法:
//   student-promotion preview <系ID> <年级ID> <学年> [数据库路径]
//   student-promotion commit  <系ID> <年级ID> <学年> [数据库路径]
//   student-promotion evaluate <学号> <学年> [数据库路径]
// 输出: JSON 报告 (stdout)
// ==========================================

use std::sync::{Arc, Mutex};

use student_promotion::{db, logging, PromotionApi};

/// 默认数据库路径 (应用数据目录下 student_promotion.db)
fn default_db_path() -> String {
    let mut dir = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    dir.push("student-promotion");
    std::fs::create_dir_all(&dir).ok();
    dir.push("student_promotion.db");
    dir.to_string_lossy().to_string()
}

fn usage() -> ! {
    eprintln!("用法:");
    eprintln!("  student-promotion preview  <系ID> <年级ID> <学年> [数据库路径]");
    eprintln!("  student-promotion commit   <系ID> <年级ID> <学年> [数据库路径]");
    eprintln!("  student-promotion evaluate <学号> <学年> [数据库路径]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", student_promotion::APP_NAME);
    tracing::info!("系统版本: {}", student_promotion::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let command = args[1].as_str();
    let open = |db_path: &str| -> anyhow::Result<PromotionApi> {
        tracing::info!("使用数据库: {}", db_path);
        let conn = db::open_sqlite_connection(db_path)?;
        db::init_schema(&conn)?;
        Ok(PromotionApi::from_connection(Arc::new(Mutex::new(conn))))
    };

    match command {
        "preview" | "commit" => {
            if args.len() < 5 {
                usage();
            }
            let (department_id, stage_id, academic_year) = (&args[2], &args[3], &args[4]);
            let db_path = args.get(5).cloned().unwrap_or_else(default_db_path);
            let api = open(&db_path)?;

            if command == "preview" {
                let report = api
                    .preview_batch(department_id, stage_id, academic_year)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let result = api
                    .commit_batch(department_id, stage_id, academic_year)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        "evaluate" => {
            if args.len() < 4 {
                usage();
            }
            let (student_id, academic_year) = (&args[2], &args[3]);
            let db_path = args.get(4).cloned().unwrap_or_else(default_db_path);
            let api = open(&db_path)?;

            let decision = api.evaluate(student_id, academic_year).await?;
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        _ => usage(),
    }

    Ok(())
}
