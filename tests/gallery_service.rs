mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::FakeDirectory;
use shootbook::error::AppError;
use shootbook::models::{GalleryFilter, GalleryPatch, Role};
use shootbook::services::gallery::GalleryService;
use shootbook::store::MemoryGalleryStore;

struct Fixture {
    service: GalleryService,
    photographer: Uuid,
    other_photographer: Uuid,
    customer: Uuid,
}

fn fixture() -> Fixture {
    let photographer = Uuid::new_v4();
    let other_photographer = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let directory = FakeDirectory::default()
        .with_user(photographer, Role::Photographer)
        .with_user(other_photographer, Role::Photographer)
        .with_user(customer, Role::Customer);

    Fixture {
        service: GalleryService::new(Arc::new(MemoryGalleryStore::new()), Arc::new(directory)),
        photographer,
        other_photographer,
        customer,
    }
}

#[tokio::test]
async fn create_and_read_back() {
    let f = fixture();
    let created = f
        .service
        .create_gallery(f.photographer, common::gallery_input(3000.0))
        .await
        .unwrap();

    let fetched = f.service.get_gallery(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.photographer_id, f.photographer);
}

#[tokio::test]
async fn create_rejects_out_of_range_terms() {
    let f = fixture();

    let mut input = common::gallery_input(-5.0);
    let result = f.service.create_gallery(f.photographer, input.clone()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    input.price = 100.0;
    input.hours = 0.0;
    let result = f.service.create_gallery(f.photographer, input.clone()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    input.hours = 1.0;
    input.delivery_time = -1;
    let result = f.service.create_gallery(f.photographer, input).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn only_photographers_create_galleries() {
    let f = fixture();

    let result = f
        .service
        .create_gallery(f.customer, common::gallery_input(1000.0))
        .await;
    assert!(matches!(result, Err(AppError::Authorization(_))));

    let result = f
        .service
        .create_gallery(Uuid::new_v4(), common::gallery_input(1000.0))
        .await;
    assert!(matches!(result, Err(AppError::NotFound { resource: "user", .. })));
}

#[tokio::test]
async fn missing_gallery_is_not_found() {
    let f = fixture();
    let result = f.service.get_gallery(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound { resource: "gallery", .. })));
}

#[tokio::test]
async fn non_owner_update_is_rejected_and_gallery_unchanged() {
    let f = fixture();
    let g1 = f
        .service
        .create_gallery(f.photographer, common::gallery_input(3000.0))
        .await
        .unwrap();

    let result = f
        .service
        .update_gallery(
            g1.id,
            f.other_photographer,
            GalleryPatch {
                price: Some(1.0),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Authorization(_))));
    assert_eq!(f.service.get_gallery(g1.id).await.unwrap(), g1);
}

#[tokio::test]
async fn owner_update_applies_patch() {
    let f = fixture();
    let g1 = f
        .service
        .create_gallery(f.photographer, common::gallery_input(3000.0))
        .await
        .unwrap();

    let updated = f
        .service
        .update_gallery(
            g1.id,
            f.photographer,
            GalleryPatch {
                price: Some(2800.0),
                included: Some(vec!["Drone shots".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 2800.0);
    assert_eq!(updated.included, vec!["Drone shots".to_string()]);
    assert_eq!(updated.hours, g1.hours);
    assert_eq!(f.service.get_gallery(g1.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_validates_patch() {
    let f = fixture();
    let g1 = f
        .service
        .create_gallery(f.photographer, common::gallery_input(3000.0))
        .await
        .unwrap();

    let result = f
        .service
        .update_gallery(
            g1.id,
            f.photographer,
            GalleryPatch {
                hours: Some(-2.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_of_missing_gallery_is_not_found() {
    let f = fixture();
    let result = f
        .service
        .update_gallery(Uuid::new_v4(), f.photographer, GalleryPatch::default())
        .await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn delete_is_owner_only_and_second_delete_is_not_found() {
    let f = fixture();
    let g1 = f
        .service
        .create_gallery(f.photographer, common::gallery_input(3000.0))
        .await
        .unwrap();

    let result = f.service.delete_gallery(g1.id, f.customer).await;
    assert!(matches!(result, Err(AppError::Authorization(_))));

    f.service.delete_gallery(g1.id, f.photographer).await.unwrap();

    let again = f.service.delete_gallery(g1.id, f.photographer).await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn list_filters_by_photographer_and_price() {
    let f = fixture();
    for price in [500.0, 1500.0, 2500.0] {
        f.service
            .create_gallery(f.photographer, common::gallery_input(price))
            .await
            .unwrap();
    }
    f.service
        .create_gallery(f.other_photographer, common::gallery_input(1500.0))
        .await
        .unwrap();

    let mine = f
        .service
        .list_galleries(&GalleryFilter {
            photographer_id: Some(f.photographer),
            min_price: Some(1000.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|g| g.photographer_id == f.photographer && g.price >= 1000.0));

    let inverted = f
        .service
        .list_galleries(&GalleryFilter {
            min_price: Some(10.0),
            max_price: Some(1.0),
            ..Default::default()
        })
        .await;
    assert!(matches!(inverted, Err(AppError::Validation(_))));
}
