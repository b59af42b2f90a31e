//! Replication behavior across a small swarm.

use auction_swarm::{BidOutcome, CloseAuctionRequest, CloseOutcome, OpenAuctionRequest, PlaceBidRequest};

use crate::common::SwarmHarness;

fn open(id: &str, item: &str, price: &str) -> OpenAuctionRequest {
    OpenAuctionRequest::parse(id, item, price).unwrap()
}

fn bid(id: &str, amount: &str, bidder: &str) -> PlaceBidRequest {
    PlaceBidRequest::parse(id, amount, bidder).unwrap()
}

#[tokio::test]
async fn open_replicates_to_every_connected_node() {
    let swarm = SwarmHarness::new(3).await;
    swarm.connect_all().await;

    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();

    for i in 0..swarm.len() {
        let auction = swarm
            .node(i)
            .coordinator
            .machine()
            .store()
            .get("A1")
            .await
            .unwrap();
        assert_eq!(auction.item, "Vase");
        assert_eq!(auction.starting_price, 10);
        assert_eq!(auction.highest_bid, None);

        let persisted = swarm.node(i).kv.get("auction:A1").await.unwrap();
        assert_eq!(persisted["item"], "Vase");
    }
}

#[tokio::test]
async fn full_auction_round_across_three_nodes() {
    let swarm = SwarmHarness::new(3).await;
    swarm.connect_all().await;

    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();

    // Bob bids from node 1; everyone converges on 15.
    let outcome = swarm
        .node(1)
        .coordinator
        .place_bid(&bid("A1", "15", "Bob"))
        .await
        .unwrap();
    assert_eq!(outcome, BidOutcome::Accepted);

    // Carl's lower bid from node 2 is rejected locally and never mirrored.
    let outcome = swarm
        .node(2)
        .coordinator
        .place_bid(&bid("A1", "12", "Carl"))
        .await
        .unwrap();
    assert_eq!(outcome, BidOutcome::Rejected);

    for i in 0..swarm.len() {
        let auction = swarm
            .node(i)
            .coordinator
            .machine()
            .store()
            .get("A1")
            .await
            .unwrap();
        assert_eq!(auction.highest_bid, Some(15));
        assert_eq!(auction.highest_bidder.as_deref(), Some("Bob"));
    }

    // The seller closes from node 0; every node persists the closed copy.
    let outcome = swarm
        .node(0)
        .coordinator
        .close_auction(&CloseAuctionRequest::new("A1"))
        .await
        .unwrap();
    let CloseOutcome::Closed(snapshot) = outcome else {
        panic!("expected close snapshot");
    };
    assert_eq!(snapshot.item, "Vase");
    assert_eq!(snapshot.highest_bid, Some(15));
    assert_eq!(snapshot.highest_bidder.as_deref(), Some("Bob"));

    for i in 0..swarm.len() {
        let persisted = swarm.node(i).kv.get("auction:A1").await.unwrap();
        assert_eq!(persisted["closed"], serde_json::json!(true));
    }
}

#[tokio::test]
async fn replicated_mutations_do_not_echo() {
    let swarm = SwarmHarness::new(3).await;
    swarm.connect_all().await;

    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();
    swarm
        .node(0)
        .coordinator
        .place_bid(&bid("A1", "15", "Bob"))
        .await
        .unwrap();

    // Each node applied each mutation exactly once: one originator write
    // plus one replica write per peer, never more.
    for i in 0..swarm.len() {
        assert_eq!(swarm.node(i).kv.put_count().await, 2);
    }
}

#[tokio::test]
async fn late_joiner_is_caught_up_in_id_order() {
    let swarm = SwarmHarness::new(3).await;
    swarm.connect(0, 1).await;

    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A3", "Clock", "5"))
        .await
        .unwrap();
    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();

    // Node 2 joins after the fact and receives one open per known auction.
    swarm.connect(0, 2).await;

    let store = swarm.node(2).coordinator.machine().store();
    let ids: Vec<String> = store
        .all()
        .await
        .into_iter()
        .map(|a| a.auction_id)
        .collect();
    assert_eq!(ids, vec!["A1", "A3"]);
    assert_eq!(store.get("A1").await.unwrap().item, "Vase");
    assert_eq!(store.get("A3").await.unwrap().starting_price, 5);
}

#[tokio::test]
async fn catch_up_does_not_replay_bids() {
    let swarm = SwarmHarness::new(2).await;
    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();
    swarm
        .node(0)
        .coordinator
        .place_bid(&bid("A1", "15", "Bob"))
        .await
        .unwrap();

    swarm.connect(0, 1).await;

    // Catch-up only transfers the auction itself; the intervening bid is
    // lost to the late joiner (accepted weak consistency).
    let auction = swarm
        .node(1)
        .coordinator
        .machine()
        .store()
        .get("A1")
        .await
        .unwrap();
    assert_eq!(auction.highest_bid, None);
}

#[tokio::test]
async fn nodes_diverge_under_partition() {
    let swarm = SwarmHarness::new(3).await;
    swarm.connect_all().await;

    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();

    // Node 2 becomes unreachable; node 0's higher bid reaches only node 1.
    swarm.router.partition(&swarm.node(2).key).await;
    swarm
        .node(0)
        .coordinator
        .place_bid(&bid("A1", "15", "Bob"))
        .await
        .unwrap();

    // Node 2, unaware of the 15, accepts a local 12; its peers reject the
    // mirrored copy, and nothing ever reconciles the difference.
    let outcome = swarm
        .node(2)
        .coordinator
        .place_bid(&bid("A1", "12", "Carl"))
        .await
        .unwrap();
    assert_eq!(outcome, BidOutcome::Accepted);

    let highest = |i: usize| {
        let swarm = &swarm;
        async move {
            swarm
                .node(i)
                .coordinator
                .machine()
                .store()
                .get("A1")
                .await
                .unwrap()
                .highest_bid
        }
    };
    assert_eq!(highest(0).await, Some(15));
    assert_eq!(highest(1).await, Some(15));
    assert_eq!(highest(2).await, Some(12));
}

#[tokio::test]
async fn unreachable_peer_is_retried_on_the_next_broadcast() {
    let swarm = SwarmHarness::new(2).await;
    swarm.connect_all().await;

    swarm.router.partition(&swarm.node(1).key).await;
    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A1", "Vase", "10"))
        .await
        .unwrap();

    // Failure does not evict the peer.
    assert_eq!(swarm.node(0).coordinator.peers().len().await, 1);
    assert!(swarm
        .node(1)
        .coordinator
        .machine()
        .store()
        .get("A1")
        .await
        .is_none());

    // Once reachable again, the next broadcast goes through.
    swarm.router.restore(&swarm.node(1).key).await;
    swarm
        .node(0)
        .coordinator
        .open_auction(&open("A2", "Clock", "5"))
        .await
        .unwrap();
    assert!(swarm
        .node(1)
        .coordinator
        .machine()
        .store()
        .get("A2")
        .await
        .is_some());
}
