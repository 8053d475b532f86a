//! # Multi-Organization Resolution Flows
//!
//! Resolution against several independent membership stores, including the
//! file-system wallet adapter and the documented first-match policy.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cg_01_identity_resolution::adapters::FileWallet;
    use cg_01_identity_resolution::{IdentityRecord, IdentityResolver, MembershipRegistry};
    use shared_types::OrgIndex;

    use crate::fixtures::{enroll, Consortium};

    #[tokio::test]
    async fn test_round_trip_each_organization() {
        let consortium = Consortium::new(&[&["a"], &["b"], &["c"]]);
        let clients: Vec<_> = (1..=3u8)
            .map(|org| {
                let client = enroll(&format!("user{org}"));
                consortium.register(org, &format!("user{org}"), &client.cert_pem);
                (org, client)
            })
            .collect();

        let resolver = consortium.resolver();
        for (org, client) in &clients {
            let principal = resolver.resolve(&client.cert_pem).await.unwrap().unwrap();
            assert_eq!(principal.org, OrgIndex::new(*org).unwrap());
            assert_eq!(principal.name, format!("user{org}"));
        }
    }

    #[tokio::test]
    async fn test_unknown_certificate_resolves_to_none() {
        let consortium = Consortium::new(&[&["a"], &["b"]]);
        consortium.register(1, "alice", &enroll("alice").cert_pem);

        let resolver = consortium.resolver();
        let stranger = enroll("stranger");
        assert!(resolver.resolve(&stranger.cert_pem).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_certificate_resolves_to_first_registered_org() {
        let consortium = Consortium::new(&[&["a"], &["b"], &["c"]]);
        let shared = enroll("shared");
        consortium.register(3, "in-org3", &shared.cert_pem);
        consortium.register(2, "in-org2", &shared.cert_pem);

        let resolver = consortium.resolver();
        let principal = resolver.resolve(&shared.cert_pem).await.unwrap().unwrap();
        assert_eq!(principal.org, OrgIndex::new(2).unwrap());
        assert_eq!(principal.name, "in-org2");
    }

    #[tokio::test]
    async fn test_escaped_input_matches_wallet_stored_newlines() {
        let consortium = Consortium::new(&[&["a"]]);
        let client = enroll("alice");
        consortium.register(1, "alice", &client.cert_pem);

        let resolver = consortium.resolver();
        let escaped = client.cert_pem.replace('\n', "\\n");
        let principal = resolver.resolve(&escaped).await.unwrap().unwrap();
        assert_eq!(principal.name, "alice");
    }

    #[tokio::test]
    async fn test_file_wallet_participates_in_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let client = enroll("walleted");
        let record = IdentityRecord::x509(client.cert_pem.clone(), Some(client.key_pem.clone()), "Org2MSP");
        std::fs::write(
            dir.path().join("walleted.id"),
            serde_json::to_string(&record).unwrap(),
        )
        .unwrap();

        // Org 1 is an empty in-memory store; org 2 is the on-disk wallet.
        let consortium = Consortium::new(&[&["a"], &["b"]]);
        let resolver = IdentityResolver::new(vec![
            Arc::clone(&consortium.members[0]) as Arc<dyn MembershipRegistry>,
            Arc::new(FileWallet::new(dir.path())) as Arc<dyn MembershipRegistry>,
        ]);

        let principal = resolver.resolve(&client.cert_pem).await.unwrap().unwrap();
        assert_eq!(principal.org, OrgIndex::new(2).unwrap());
        assert_eq!(principal.name, "walleted");
    }
}
