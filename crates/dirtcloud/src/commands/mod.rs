pub mod destroy;
pub mod import;
pub mod lookup;
pub mod refresh;

use serde::Serialize;

/// 結果を整形済み JSON として stdout に出力
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
