use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::{AuthConfig, AuthService};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::domain::LoginInput;

fn bench_auth(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::hours(1) });

    // seed the admin outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    let admin = rt.block_on(svc.bootstrap_admin("bench@example.com", "Bench", "Benchmark1")).unwrap().unwrap();
    let token = svc.issue_token(&admin).unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });

    c.bench_function("auth_token_authenticate", |b| {
        b.iter(|| {
            rt.block_on(svc.authenticate(&token)).unwrap();
        });
    });
}

criterion_group!(benches, bench_auth);
criterion_main!(benches);
