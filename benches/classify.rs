use std::hint::black_box;

use column_roles::{CellValue, ClassifierConfig, ColumnClassifier, EnsembleKind};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const CLASSES: [&str; 4] = ["1A", "2B", "3C", "3年A組"];
const NAMES: [&str; 5] = ["田中太郎", "山田花子", "佐藤健", "鈴木一郎", "高橋美咲"];
const QUESTIONS: [&str; 3] = [
    "空はどうして青く見えるんでしょうか？",
    "光の速さはどうやって測りましたか？",
    "植物はどうやって水を吸い上げますか？",
];
const REASONS: [&str; 3] = [
    "実験が楽しかったから",
    "先生の説明がわかりやすかったので",
    "前から気になっていたため",
];

/// Survey layout padded with `extra` free-text memo columns.
fn generate_survey(extra: usize, rows: usize) -> (Vec<String>, Vec<Vec<CellValue>>) {
    let mut headers = ["タイムスタンプ", "クラス", "名前", "回答", "理由"]
        .map(String::from)
        .to_vec();
    headers.extend((0..extra).map(|i| format!("メモ{i}")));
    let rows = (0..rows)
        .map(|i| {
            let mut row = vec![
                CellValue::from(format!("2024/04/01 10:{:02}:00", i % 60)),
                CellValue::from(CLASSES[i % CLASSES.len()]),
                CellValue::from(NAMES[i % NAMES.len()]),
                CellValue::from(QUESTIONS[i % QUESTIONS.len()]),
                CellValue::from(REASONS[i % REASONS.len()]),
            ];
            row.extend((0..extra).map(|j| CellValue::from(format!("memo {i}-{j}"))));
            row
        })
        .collect();
    (headers, rows)
}

fn bench_classify(c: &mut Criterion) {
    let weighted = ColumnClassifier::default();
    let stream = ColumnClassifier::new(ClassifierConfig {
        ensemble: EnsembleKind::StreamAverage,
        ..ClassifierConfig::default()
    });

    let mut group = c.benchmark_group("classify");
    for extra in [0usize, 20, 95] {
        let (headers, rows) = generate_survey(extra, 10);
        group.bench_with_input(
            BenchmarkId::new("weighted_sum", headers.len()),
            &(headers.clone(), rows.clone()),
            |b, (headers, rows)| b.iter(|| weighted.classify(black_box(headers), black_box(rows))),
        );
        group.bench_with_input(
            BenchmarkId::new("stream_average", headers.len()),
            &(headers, rows),
            |b, (headers, rows)| b.iter(|| stream.classify(black_box(headers), black_box(rows))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
