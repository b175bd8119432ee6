use gena_challenges::tower::*;
use serde_json::json;

#[test]
fn test_initial_tower_puts_smaller_discs_on_top() {
    let tower = Challenge::new(vec![1, 4, 1], 4).unwrap().initial_tower();
    assert_eq!(tower.move_count, 0);
    assert_eq!(tower.num_rods(), 4);
    assert_eq!(tower.num_discs(), 3);
    assert_eq!(tower.top(1), Some(1));
    assert_eq!(tower.rod(1), &[3, 1]);
    assert_eq!(tower.top(4), Some(2));
    assert_eq!(tower.top(2), None);
    assert_eq!(tower, Tower::from_rods(vec![vec![1, 3], vec![], vec![], vec![2]]));
}

#[test]
fn test_is_restored() {
    assert!(Tower::from_rods(vec![vec![1, 2, 3], vec![], vec![]]).is_restored());
    assert!(!Tower::from_rods(vec![vec![1, 2], vec![3], vec![]]).is_restored());
    assert!(!Tower::from_rods(vec![vec![], vec![1, 2, 3], vec![]]).is_restored());
}

#[test]
fn test_is_legal_move() {
    let tower = Tower::from_rods(vec![vec![2], vec![1, 3], vec![]]);
    assert!(tower.is_legal_move(Move::new(2, 1)));
    assert!(tower.is_legal_move(Move::new(2, 3)));
    assert!(tower.is_legal_move(Move::new(1, 3)));
    // larger disc onto smaller
    assert!(!tower.is_legal_move(Move::new(1, 2)));
    // empty source
    assert!(!tower.is_legal_move(Move::new(3, 1)));
    // same rod
    assert!(!tower.is_legal_move(Move::new(2, 2)));
    // out of range
    assert!(!tower.is_legal_move(Move::new(0, 1)));
    assert!(!tower.is_legal_move(Move::new(1, 4)));
}

#[test]
fn test_apply_move_builds_fresh_state() {
    let tower = Tower::from_rods(vec![vec![2], vec![1, 3], vec![]]);
    let next = tower.apply_move(Move::new(2, 1));
    assert_eq!(next.move_count, 1);
    assert_eq!(next, {
        let mut expected = Tower::from_rods(vec![vec![1, 2], vec![3], vec![]]);
        expected.move_count = 1;
        expected
    });
    // source untouched
    assert_eq!(tower, Tower::from_rods(vec![vec![2], vec![1, 3], vec![]]));
    assert_eq!(next.apply_move(Move::new(2, 3)).move_count, 2);
}

#[test]
fn test_detached_resets_move_count() {
    let tower = Tower::from_rods(vec![vec![2], vec![1], vec![]]).apply_move(Move::new(2, 1));
    let copy = tower.detached();
    assert_eq!(copy.move_count, 0);
    assert_eq!(copy.rods(), tower.rods());
}

#[test]
fn test_moves_are_all_legal_moves() {
    let tower = Tower::from_rods(vec![vec![2], vec![1, 3], vec![]]);
    let moves: Vec<Move> = tower.moves().collect();
    assert_eq!(
        moves,
        vec![Move::new(1, 3), Move::new(2, 1), Move::new(2, 3)]
    );
}

#[test]
fn test_move_between() {
    let tower = Tower::from_rods(vec![vec![2], vec![1, 3], vec![]]);
    let next = tower.apply_move(Move::new(2, 3));
    assert_eq!(tower.move_between(&next), Some(Move::new(2, 3)));
    assert_eq!(tower.move_between(&tower), None);
    let two_moves_away = next.apply_move(Move::new(1, 2));
    assert_eq!(tower.move_between(&two_moves_away), None);
}

#[test]
fn test_permuted_keeps_target_rod() {
    let tower = Tower::from_rods(vec![vec![1], vec![2], vec![3], vec![4]]);
    let permuted = tower.permuted(&[4, 2, 3]);
    assert_eq!(permuted, Tower::from_rods(vec![vec![1], vec![4], vec![2], vec![3]]));
}

#[test]
fn test_aliases_share_signature() {
    let tower = Tower::from_rods(vec![vec![1, 2, 3], vec![4, 5], vec![6, 7], vec![8, 9]]);
    let aliases = aliases(&tower);
    assert_eq!(aliases.len(), 6);
    assert_eq!(aliases[0], tower);
    for alias in &aliases {
        assert_eq!(Signature::of(alias), Signature::of(&tower));
    }
}

#[test]
#[should_panic]
fn test_from_rods_rejects_larger_disc_on_top() {
    Tower::from_rods(vec![vec![2, 1], vec![], vec![]]);
}

#[test]
#[should_panic]
fn test_from_rods_rejects_duplicate_disc() {
    Tower::from_rods(vec![vec![1], vec![1], vec![]]);
}

#[test]
#[should_panic]
fn test_from_rods_rejects_missing_disc() {
    Tower::from_rods(vec![vec![1], vec![3], vec![]]);
}

#[test]
fn test_display() {
    let tower = Tower::from_rods(vec![vec![1, 3], vec![], vec![2]]);
    assert_eq!(tower.to_string(), "0: [1 3] [] [2]");
    assert_eq!(Move::new(2, 1).to_string(), "2->1");
}

#[test]
fn test_challenge_rejects_malformed_input() {
    assert!(Challenge::new(vec![], 3).is_err());
    assert!(Challenge::new(vec![1, 0, 1], 3).is_err());
    assert!(Challenge::new(vec![1, 5, 1], 4).is_err());
    assert!(Challenge::new(vec![1], 0).is_err());
    assert!(Challenge::new(vec![1, 4, 1], 4).is_ok());
}

#[test]
fn test_track_parsing() {
    let track: Track = "num_discs=10,num_rods=4".parse().unwrap();
    assert_eq!(
        track,
        Track {
            num_discs: 10,
            num_rods: 4
        }
    );
    assert_eq!(track.to_string(), "num_discs=10,num_rods=4");
    assert_eq!("num_rods=3, num_discs=2".parse::<Track>().unwrap().num_discs, 2);
    assert!("num_discs=10".parse::<Track>().is_err());
    assert!("num_discs=ten,num_rods=4".parse::<Track>().is_err());
    assert!("num_pegs=4,num_discs=3".parse::<Track>().is_err());
}

#[test]
fn test_track_from_vec() {
    let track = Track::try_from(vec![5, 4]).unwrap();
    assert_eq!(track.num_discs, 5);
    assert_eq!(track.num_rods, 4);
    let arr: Vec<i32> = track.into();
    assert_eq!(arr, vec![5, 4]);
    assert!(Track::try_from(vec![5]).is_err());
    assert!(Track::try_from(vec![-1, 4]).is_err());
}

#[test]
fn test_generate_instance_is_deterministic() {
    let track = Track {
        num_discs: 8,
        num_rods: 4,
    };
    let a = Challenge::generate_instance(&[7; 32], &track).unwrap();
    let b = Challenge::generate_instance(&[7; 32], &track).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.num_discs(), 8);
    assert!(a.validate().is_ok());
    assert!(a.disc_positions.iter().all(|&rod| (1..=4).contains(&rod)));
}

#[test]
fn test_generate_instance_rejects_bad_track() {
    let seed = [0; 32];
    assert!(Challenge::generate_instance(&seed, &Track { num_discs: 0, num_rods: 4 }).is_err());
    assert!(Challenge::generate_instance(&seed, &Track { num_discs: 3, num_rods: 2 }).is_err());
}

#[test]
fn test_challenge_json_shape() {
    let challenge = Challenge::new(vec![1, 3, 3], 4).unwrap();
    let value = serde_json::to_value(&challenge).unwrap();
    assert_eq!(value["num_rods"], json!(4));
    assert_eq!(value["disc_positions"], json!([1, 3, 3]));
    let back: Challenge = serde_json::from_value(value).unwrap();
    assert_eq!(back, challenge);
}

#[test]
fn test_verify_accepts_baseline() {
    let challenge = Challenge::new(vec![1, 3, 3], 4).unwrap();
    let baseline = challenge.compute_baseline().unwrap();
    assert_eq!(baseline.moves.len(), 5);
    assert!(challenge.verify_solution(&baseline).is_ok());
}

#[test]
fn test_verify_accepts_empty_solution_for_restored_tower() {
    let challenge = Challenge::new(vec![1, 1, 1], 3).unwrap();
    assert!(challenge.verify_solution(&Solution::new()).is_ok());
}

#[test]
fn test_verify_rejects_illegal_move() {
    let challenge = Challenge::new(vec![1, 4, 1], 4).unwrap();
    let solution = Solution {
        moves: vec![Move::new(4, 1)],
    };
    let err = challenge.verify_solution(&solution).unwrap_err();
    assert!(err.to_string().contains("Move 0"));
}

#[test]
fn test_verify_rejects_unfinished_solution() {
    let challenge = Challenge::new(vec![1, 4, 1], 4).unwrap();
    let solution = Solution {
        moves: vec![Move::new(1, 2), Move::new(4, 1)],
    };
    assert!(challenge.verify_solution(&solution).is_err());
}

#[test]
fn test_verify_rejects_suboptimal_solution() {
    let challenge = Challenge::new(vec![1, 4, 1], 4).unwrap();
    // optimal is 1->2, 4->1, 2->1; this detours through rod 3
    let solution = Solution {
        moves: vec![
            Move::new(1, 2),
            Move::new(2, 3),
            Move::new(4, 1),
            Move::new(3, 1),
        ],
    };
    let err = challenge.verify_solution(&solution).unwrap_err();
    assert!(err.to_string().contains("greater than optimal (3)"));
}

#[test]
fn test_solution_from_path() {
    let tower = Tower::from_rods(vec![vec![1, 3], vec![], vec![2]]);
    let path = vec![
        tower.clone(),
        tower.apply_move(Move::new(1, 2)),
    ];
    assert_eq!(
        Solution::from_path(&path).unwrap(),
        Solution {
            moves: vec![Move::new(1, 2)]
        }
    );
    let broken = vec![tower.clone(), tower];
    assert!(Solution::from_path(&broken).is_err());
}
