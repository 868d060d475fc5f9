use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use riverstone_engine::pot::{calculate_side_pots, split_pot, total, Contribution, Pot};

fn live(player_id: usize, total_bet: u32) -> Contribution {
    Contribution {
        player_id,
        total_bet,
        folded: false,
    }
}

#[test]
fn short_all_in_creates_a_side_pot() {
    let pots = calculate_side_pots(&[live(0, 50), live(1, 100), live(2, 100)]);
    assert_eq!(
        pots,
        vec![
            Pot {
                amount: 150,
                eligible: vec![0, 1, 2]
            },
            Pot {
                amount: 100,
                eligible: vec![1, 2]
            },
        ]
    );
}

#[test]
fn split_of_101_is_51_and_50() {
    let shares = split_pot(101, &[4, 2]);
    assert_eq!(shares, vec![(4, 51), (2, 50)]);
}

#[test]
fn pots_always_hold_exactly_what_was_bet() {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    for _ in 0..2_000 {
        let players = rng.random_range(2..=9);
        let contributions: Vec<Contribution> = (0..players)
            .map(|id| Contribution {
                player_id: id,
                total_bet: rng.random_range(0..=6) * 25,
                folded: rng.random_bool(0.3),
            })
            .collect();
        let pots = calculate_side_pots(&contributions);
        let bet: u32 = contributions.iter().map(|c| c.total_bet).sum();
        let anyone_live = contributions.iter().any(|c| !c.folded && c.total_bet > 0);

        if anyone_live {
            assert_eq!(total(&pots), bet, "{contributions:?}");
        }
        for w in pots.windows(2) {
            assert!(w[1].eligible.len() <= w[0].eligible.len());
            assert!(w[1].eligible.iter().all(|id| w[0].eligible.contains(id)));
        }
        for pot in &pots {
            assert!(!pot.eligible.is_empty());
            for id in &pot.eligible {
                assert!(!contributions[*id].folded);
            }
        }
    }
}
