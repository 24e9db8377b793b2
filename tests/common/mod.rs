#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use column_roles::CellValue;
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).expect("write temp file bytes");
        path
    }
}

/// Converts string rows into text cells.
pub fn text_rows(rows: &[&[&str]]) -> Vec<Vec<CellValue>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
        .collect()
}

pub const SURVEY_HEADERS: [&str; 6] = ["タイムスタンプ", "メール", "クラス", "名前", "回答", "理由"];

/// Six-column survey export: timestamp, mail, class, name, question, reason.
pub fn survey_rows() -> Vec<Vec<CellValue>> {
    text_rows(&[
        &[
            "2024/04/01 10:00:00",
            "student1@example.com",
            "1A",
            "田中太郎",
            "空はどうして青く見えるんでしょうか？",
            "実験が楽しかったから",
        ],
        &[
            "2024/04/01 10:05:00",
            "student2@example.com",
            "2B",
            "山田花子",
            "光の速さはどうやって測りましたか？",
            "先生の説明がわかりやすかったので",
        ],
        &[
            "2024/04/01 10:10:00",
            "student3@example.com",
            "1A",
            "佐藤健",
            "水は何度で沸騰するんでしょうか？",
            "前から気になっていたため",
        ],
        &[
            "2024/04/01 10:15:00",
            "student4@example.com",
            "3C",
            "鈴木一郎",
            "月の形はどうして毎日変わりますか？",
            "友達と話し合えたから",
        ],
        &[
            "2024/04/01 10:20:00",
            "student5@example.com",
            "2B",
            "高橋美咲",
            "植物はどうやって水を吸い上げますか？",
            "新しい発見があったので",
        ],
    ])
}
