//! Application status lifecycle over the in-memory repository.

use std::sync::Arc;

use connect::domain::{ApplicationService, ApplicationStatus, ErrorCode, ResourceId};
use connect::outbound::memory::InMemoryApplicationRepository;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn service() -> ApplicationService<InMemoryApplicationRepository> {
    ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn id(raw: &str) -> ResourceId {
    ResourceId::new(raw).expect("valid id")
}

#[rstest]
#[case(ApplicationStatus::Accepted, ApplicationStatus::Rejected)]
#[case(ApplicationStatus::Rejected, ApplicationStatus::Accepted)]
#[case(ApplicationStatus::Accepted, ApplicationStatus::Pending)]
#[tokio::test]
async fn decided_applications_stay_decided(
    service: ApplicationService<InMemoryApplicationRepository>,
    #[case] first: ApplicationStatus,
    #[case] second: ApplicationStatus,
) {
    let application = service
        .submit(id("job-1"), id("user-1"))
        .await
        .expect("submit succeeds");
    assert_eq!(application.status(), ApplicationStatus::Pending);

    service
        .transition(application.id(), first)
        .await
        .expect("first decision applies");
    let err = service
        .transition(application.id(), second)
        .await
        .expect_err("second decision refused");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let listed = service.list_for_job(&id("job-1")).await.expect("list");
    assert_eq!(listed[0].status(), first);
}

#[rstest]
#[tokio::test]
async fn concurrent_decisions_settle_on_exactly_one(
    service: ApplicationService<InMemoryApplicationRepository>,
) {
    let application = service
        .submit(id("job-2"), id("user-2"))
        .await
        .expect("submit succeeds");

    let (accept, reject) = tokio::join!(
        service.transition(application.id(), ApplicationStatus::Accepted),
        service.transition(application.id(), ApplicationStatus::Rejected),
    );

    assert_ne!(accept.is_ok(), reject.is_ok());
}
