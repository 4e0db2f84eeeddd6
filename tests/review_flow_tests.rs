//! Sign / sign-and-execute workflow against the in-memory Safe.

use safe_proposals::{
    load_from_query, to_query_string, Action, Address, Error, MockSafe, Proposal,
    ProposalConfig, ProposalReview, SafeClient, SafeSetup,
};

fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; 20])
}

fn proposal() -> Proposal {
    Proposal::new(vec![
        Action::transfer(addr(0xEE).to_checksum(), "1000000000000000000"),
        Action::new(addr(0xDD).to_checksum(), "0", "0xa9059cbb"),
    ])
}

#[tokio::test]
async fn test_two_of_three_flow() {
    let owners = vec![addr(1), addr(2), addr(3)];
    let safe = MockSafe::new(owners, 2).with_account(addr(1));

    let mut review = ProposalReview::new(safe.clone(), proposal()).unwrap();
    let state = review.refresh_approvals().await.unwrap();
    assert_eq!(state.total_approvers(), 0);
    assert!(state.can_sign());
    assert!(!state.can_execute());

    review.sign().await.unwrap();
    let state = review.state().unwrap();
    assert!(state.has_approved());
    assert_eq!(state.to_string(), "1 out of 2 signed");
    assert!(!state.can_execute());

    // second owner opens the same link
    safe.set_account(Some(addr(2)));
    let state = review.refresh_approvals().await.unwrap();
    assert!(!state.has_approved());
    assert!(state.can_execute());

    review.sign_and_execute().await.unwrap();
    assert!(safe.is_executed(&review.transaction().with_nonce(0)));
    assert_eq!(safe.nonce(), 1);
}

#[tokio::test]
async fn test_sign_twice_is_rejected() {
    let safe = MockSafe::new(vec![addr(1), addr(2)], 2).with_account(addr(1));
    let mut review = ProposalReview::new(safe, proposal()).unwrap();

    review.sign().await.unwrap();
    assert!(matches!(review.sign().await, Err(Error::AlreadyApproved)));
}

#[tokio::test]
async fn test_execute_with_two_missing_is_rejected() {
    let owners = vec![addr(1), addr(2), addr(3)];
    let safe = MockSafe::new(owners, 3).with_account(addr(2));
    let mut review = ProposalReview::new(safe.clone(), proposal()).unwrap();
    safe.approve_as(addr(1), review.transaction()).unwrap();

    let result = review.sign_and_execute().await;
    assert!(matches!(
        result,
        Err(Error::NotExecutable {
            approvals: 1,
            threshold: 3
        })
    ));
    assert!(!safe.is_executed(review.transaction()));
}

#[tokio::test]
async fn test_caller_already_approved_waits_for_another_owner() {
    let owners = vec![addr(1), addr(2), addr(3)];
    let safe = MockSafe::new(owners, 3).with_account(addr(1));
    let mut review = ProposalReview::new(safe.clone(), proposal()).unwrap();
    safe.approve_as(addr(1), review.transaction()).unwrap();
    safe.approve_as(addr(2), review.transaction()).unwrap();

    let state = review.refresh_approvals().await.unwrap();
    assert_eq!(state.remaining(), 1);
    assert!(!state.can_execute());
    assert!(review.sign_and_execute().await.is_err());

    safe.set_account(Some(addr(3)));
    review.sign_and_execute().await.unwrap();
}

#[tokio::test]
async fn test_stranger_approval_does_not_count() {
    let owners = vec![addr(1), addr(2), addr(3)];
    let safe = MockSafe::new(owners, 3).with_account(addr(2));
    let mut review = ProposalReview::new(safe.clone(), proposal()).unwrap();
    safe.approve_as(addr(1), review.transaction()).unwrap();
    assert!(safe.approve_as(addr(0x99), review.transaction()).is_err());

    let state = review.refresh_approvals().await.unwrap();
    assert_eq!(state.approvers, vec![addr(1)]);
    assert!(!state.can_execute());
}

#[tokio::test]
async fn test_pinned_nonce_must_be_current() {
    let safe = MockSafe::new(vec![addr(1)], 1).with_account(addr(1));
    let mut review = ProposalReview::new(safe.clone(), proposal().with_nonce(5)).unwrap();

    let result = review.sign_and_execute().await;
    assert!(matches!(result, Err(Error::Safe(_))));
    assert_eq!(safe.nonce(), 0);
}

#[tokio::test]
async fn test_invalid_proposal_is_rejected_before_submission() {
    let safe = MockSafe::new(vec![addr(1)], 1);
    let invalid = Proposal::new(vec![Action::transfer("0x1234", "1")]);
    let err = ProposalReview::new(safe.clone(), invalid).err().unwrap();
    assert_eq!(err.field_errors()[0].path, "actions[0].to");

    let empty = Proposal::new(vec![]);
    assert!(matches!(
        ProposalReview::new(safe.clone(), empty),
        Err(Error::EmptyProposal)
    ));

    let config = ProposalConfig {
        max_actions: Some(1),
        ..ProposalConfig::default()
    };
    assert!(ProposalReview::with_config(safe, proposal(), &config).is_err());
}

#[tokio::test]
async fn test_shared_link_reaches_same_transaction() {
    let owners = vec![addr(1), addr(2)];
    let safe = MockSafe::new(owners, 2).with_account(addr(1));

    let query = to_query_string(&proposal().with_nonce(0)).unwrap();
    let mut first = ProposalReview::new(safe.clone(), load_from_query(&query).unwrap()).unwrap();
    first.sign().await.unwrap();

    let other = safe.clone();
    other.set_account(Some(addr(2)));
    let mut second = ProposalReview::new(other, load_from_query(&query).unwrap()).unwrap();
    assert_eq!(first.transaction(), second.transaction());

    let approvers = safe.approvers(second.transaction()).await.unwrap();
    assert_eq!(approvers, vec![addr(1)]);
    second.sign_and_execute().await.unwrap();
    assert!(safe.is_executed(first.transaction()));
}

#[tokio::test]
async fn test_validated_setup_drives_mock_safe() {
    let owners = vec![addr(1).to_checksum(), addr(2).to_checksum()];
    let setup = SafeSetup::new(owners, 2)
        .validated_with(&ProposalConfig::default())
        .unwrap();
    let safe = MockSafe::new(setup.owner_addresses().unwrap(), setup.threshold);
    assert_eq!(safe.threshold().await.unwrap(), 2);

    let too_high = SafeSetup::new(setup.owners.clone(), 3);
    assert!(matches!(
        too_high.validated_with(&ProposalConfig::default()),
        Err(Error::Validation(_))
    ));
}
