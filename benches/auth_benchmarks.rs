use chrono::Duration;
use criterion::{criterion_group, criterion_main, Criterion};
use photogram::auth::TokenIssuer;
use photogram::photos::{Comment, Photo};
use photogram::users::UserRecord;
use std::hint::black_box;
use uuid::Uuid;

fn bench_tokens(c: &mut Criterion) {
    let issuer = TokenIssuer::new("bench-secret", Duration::days(7));
    let user_id = Uuid::new_v4();
    let token = issuer.issue(user_id).unwrap();

    let mut group = c.benchmark_group("tokens");

    group.bench_function("issue", |b| b.iter(|| issuer.issue(black_box(user_id))));

    group.bench_function("verify", |b| b.iter(|| issuer.verify(black_box(&token))));

    group.bench_function("verify_garbage", |b| {
        b.iter(|| issuer.verify(black_box("not.a.token")))
    });

    group.finish();
}

fn sample_photo(comments: usize) -> Photo {
    let owner = UserRecord::new(
        "Ana".to_string(),
        "ana@example.com".to_string(),
        "hash".to_string(),
    )
    .profile();
    let mut photo = Photo::new(&owner, "Praia".to_string(), "praia.jpg".to_string());

    for i in 0..comments {
        photo.likes.push(Uuid::new_v4());
        photo
            .comments
            .push(Comment::new(&owner, format!("Comentário {}", i)));
    }
    photo
}

fn bench_photo_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("photo_json");

    for size in [0usize, 10, 100] {
        let photo = sample_photo(size);
        let json = serde_json::to_string(&photo).unwrap();

        group.bench_function(format!("serialize_{}", size), |b| {
            b.iter(|| serde_json::to_string(black_box(&photo)))
        });

        group.bench_function(format!("deserialize_{}", size), |b| {
            b.iter(|| serde_json::from_str::<Photo>(black_box(&json)))
        });
    }

    group.finish();
}

fn bench_title_search(c: &mut Criterion) {
    let photos: Vec<Photo> = (0..1000)
        .map(|i| {
            let mut photo = sample_photo(0);
            photo.title = format!("Foto número {}", i);
            photo
        })
        .collect();

    c.bench_function("title_matches_1000", |b| {
        b.iter(|| {
            photos
                .iter()
                .filter(|p| p.title_matches(black_box("NÚMERO 99")))
                .count()
        })
    });
}

criterion_group!(
    benches,
    bench_tokens,
    bench_photo_serialization,
    bench_title_search
);
criterion_main!(benches);
