use gridflow::{SimError, WorkerPool};

#[test]
fn test_checkerboard_visits_every_cell_once() {
    let workers = WorkerPool::new(2).expect("pool");
    let (cols, rows) = (7, 5);
    let mut visits = vec![0u32; cols * rows];
    let mut parities = vec![usize::MAX; cols * rows];

    workers
        .checkerboard(cols, rows, |x, y| (x + y) % 2, |x, y, parity| {
            visits[y * cols + x] += 1;
            parities[y * cols + x] = parity;
        })
        .expect("checkerboard");

    assert!(visits.iter().all(|&v| v == 1));
    for y in 0..rows {
        for x in 0..cols {
            assert_eq!(parities[y * cols + x], (x + y) % 2);
        }
    }
}

#[test]
fn test_checkerboard_results_land_on_their_cells() {
    let workers = WorkerPool::new(2).expect("pool");
    let (cols, rows) = (6, 4);
    let mut out = vec![0.0f32; cols * rows];
    workers
        .checkerboard(cols, rows, |x, y| (y * 10 + x) as f32, |x, y, v| out[y * cols + x] = v)
        .expect("checkerboard");

    let expected: Vec<f32> = (0..cols * rows)
        .map(|i| ((i / cols) * 10 + i % cols) as f32)
        .collect();
    assert_eq!(out, expected);
}

#[test]
fn test_panicking_half_keeps_the_other() {
    let workers = WorkerPool::new(2).expect("pool");
    let (cols, rows) = (4, 4);
    let mut written = vec![false; cols * rows];

    let result = workers.checkerboard(
        cols,
        rows,
        |x, y| {
            if (x + y) % 2 == 1 {
                panic!("odd cell {x},{y}");
            }
            x + y
        },
        |x, y, _| written[y * cols + x] = true,
    );

    match result {
        Err(SimError::WorkerPanicked { parity, message }) => {
            assert_eq!(parity, 1);
            assert!(message.contains("odd cell"), "{message}");
        }
        other => panic!("expected WorkerPanicked, got {:?}", other),
    }
    for y in 0..rows {
        for x in 0..cols {
            assert_eq!(written[y * cols + x], (x + y) % 2 == 0);
        }
    }
}

#[test]
fn test_shutdown_pool_refuses_work() {
    let mut workers = WorkerPool::new(2).expect("pool");
    assert!(workers.is_running());
    workers.shutdown();
    assert!(!workers.is_running());

    let result = workers.checkerboard(3, 3, |_, _| (), |_, _, _| {});
    assert!(matches!(result, Err(SimError::PoolShutdown)));

    workers.shutdown();
    assert!(!workers.is_running());
}

#[test]
fn test_single_column_grid() {
    let workers = WorkerPool::new(1).expect("pool");
    let mut count = 0;
    workers
        .checkerboard(1, 9, |_, y| y, |_, _, _| count += 1)
        .expect("checkerboard");
    assert_eq!(count, 9);
}
