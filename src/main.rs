use arrayvec::ArrayVec;
use assoc::AssocExt;
use bitvec::prelude::*;
use itertools::Itertools;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::iter::zip;

fn day1(part: u8, input: &str) -> String {
    let changes: Vec<i64> = input.trim().lines().map(|line| line.parse().expect(line)).collect();
    if part == 1 {
        changes.iter().sum::<i64>().to_string()
    } else {
        let mut seen = FxHashSet::default();
        let mut freq = 0;
        seen.insert(freq);
        for change in changes.iter().cycle() {
            freq += change;
            if !seen.insert(freq) {return freq.to_string()}
        }
        unreachable!()
    }
}

fn day2(part: u8, input: &str) -> String {
    let ids: Vec<&str> = input.trim().lines().collect();
    if part == 1 {
        let mut twos = 0u32;
        let mut threes = 0u32;
        for id in &ids {
            let mut counts = [0u8; 26];
            for c in id.bytes() {counts[(c - b'a') as usize] += 1}
            twos += counts.iter().any(|&n| n == 2) as u32;
            threes += counts.iter().any(|&n| n == 3) as u32;
        }
        (twos * threes).to_string()
    } else {
        ids.iter().tuple_combinations().find_map(|(a, b)| {
            (zip(a.bytes(), b.bytes()).filter(|(ca, cb)| ca != cb).count() == 1).then(||
                zip(a.bytes(), b.bytes())
                    .filter(|(ca, cb)| ca == cb)
                    .map(|(c, _)| c as char)
                    .collect()
            )
        }).expect("no pair of ids differs in exactly one position")
    }
}

fn day3(part: u8, input: &str) -> String {
    let re = Regex::new(r"#(\d+) @ (\d+),(\d+): (\d+)x(\d+)").unwrap();
    let claims: Vec<[usize; 5]> = re.captures_iter(input).map(|m|
        [1, 2, 3, 4, 5].map(|i| m[i].parse().expect("claim field"))
    ).collect();

    let mut fabric = vec![[0u8; 1000]; 1000];
    for &[_, x, y, w, h] in &claims {
        for row in &mut fabric[y .. y + h] {
            for cell in &mut row[x .. x + w] {
                *cell = cell.saturating_add(1);
            }
        }
    }

    if part == 1 {
        fabric.iter().flatten().filter(|&&n| n >= 2).count().to_string()
    } else {
        claims.iter().find_map(|&[id, x, y, w, h]|
            fabric[y .. y + h].iter().all(|row| row[x .. x + w].iter().all(|&n| n == 1))
                .then_some(id)
        ).expect("every claim overlaps another").to_string()
    }
}

fn day4(part: u8, input: &str) -> String {
    // [1518-11-01 00:00] Guard #10 begins shift
    let mut records: Vec<&str> = input.trim().lines().collect();
    records.sort_unstable();

    let mut tallies: FxHashMap<usize, [u32; 60]> = FxHashMap::default();
    let mut guard = None;
    let mut asleep_since = None;
    for record in records {
        let minute: usize = record[15 .. 17].parse().expect(record);
        match record.as_bytes()[19] {
            b'G' => guard = Some(
                record[26 ..].split(' ').next().unwrap().parse::<usize>().expect(record)
            ),
            b'f' => asleep_since = Some(minute),
            b'w' => {
                let tally = tallies.entry(guard.expect("wakeup before any shift"))
                                   .or_insert([0; 60]);
                for m in asleep_since.take().expect("wakeup without falling asleep") .. minute {
                    tally[m] += 1;
                }
            }
            _ => panic!("cannot parse record {}", record)
        }
    }

    let (&id, tally) = if part == 1 {
        tallies.iter().max_by_key(|(_, tally)| tally.iter().sum::<u32>()).unwrap()
    } else {
        tallies.iter().max_by_key(|(_, tally)| tally.iter().max().copied()).unwrap()
    };
    (id * (0 .. 60).max_by_key(|&m| tally[m]).unwrap()).to_string()
}

fn day5(part: u8, input: &str) -> String {
    // opposite polarities of the same unit type differ exactly in the ascii case bit
    fn reduce(units: impl Iterator<Item = u8>) -> usize {
        let mut stack: Vec<u8> = vec![];
        for c in units {
            if stack.last() == Some(&(c ^ 0x20)) {stack.pop();} else {stack.push(c)}
        }
        stack.len()
    }

    let polymer = input.trim().as_bytes();
    if part == 1 {
        reduce(polymer.iter().copied()).to_string()
    } else {
        (b'a' ..= b'z').map(|bad|
            reduce(polymer.iter().copied().filter(|&c| c | 0x20 != bad))
        ).min().unwrap().to_string()
    }
}

fn day6(part: u8, input: &str) -> String {
    let pts: Vec<(i32, i32)> = input.trim().lines().map(|line| {
        let (x, y) = line.split_once(", ").expect(line);
        (x.parse().expect(x), y.parse().expect(y))
    }).collect();
    let (minx, maxx) = pts.iter().map(|p| p.0).minmax().into_option().unwrap();
    let (miny, maxy) = pts.iter().map(|p| p.1).minmax().into_option().unwrap();

    if part == 1 {
        // an area is infinite iff it wins a cell on the bounding box edge
        let mut areas = vec![0u32; pts.len()];
        let mut infinite = vec![false; pts.len()];
        for y in miny ..= maxy { for x in minx ..= maxx {
            let mut best = None;
            let mut best_dist = i32::MAX;
            for (i, &(px, py)) in pts.iter().enumerate() {
                let dist = (px - x).abs() + (py - y).abs();
                if dist < best_dist {
                    best = Some(i);
                    best_dist = dist;
                } else if dist == best_dist {
                    best = None;
                }
            }
            if let Some(i) = best {
                areas[i] += 1;
                if x == minx || x == maxx || y == miny || y == maxy {infinite[i] = true}
            }
        }}
        zip(areas, infinite).filter_map(|(area, inf)| (!inf).then_some(area))
            .max().unwrap().to_string()
    } else {
        (miny ..= maxy).flat_map(|y| (minx ..= maxx).map(move |x| (x, y))).filter(|&(x, y)|
            pts.iter().map(|&(px, py)| (px - x).abs() + (py - y).abs()).sum::<i32>() < 10000
        ).count().to_string()
    }
}

fn day7(part: u8, input: &str) -> String {
    // Step C must be finished before step A can begin.
    let pairs: Vec<(u8, u8)> = input.trim().lines().map(|line| {
        let b = line.as_bytes();
        (b[5], b[36])
    }).collect();
    let mut remaining: Vec<u8> =
        pairs.iter().flat_map(|&(a, b)| [a, b]).sorted().dedup().collect();
    let mut pending = pairs.clone();

    if part == 1 {
        let mut order = String::with_capacity(remaining.len());
        while let Some(&c) =
            remaining.iter().find(|&&c| pending.iter().all(|&(_, after)| after != c))
        {
            order.push(c as char);
            pending.retain(|&(before, _)| before != c);
            remaining.retain(|&r| r != c);
        }
        order
    } else {
        let mut workers: [Option<(u8, u32)>; 5] = [None; 5];
        let mut t = 0;
        loop {
            for w in &mut workers {
                if let Some((c, done_at)) = *w {
                    if done_at == t {
                        pending.retain(|&(before, _)| before != c);
                        *w = None;
                    }
                }
            }
            for w in &mut workers {
                if w.is_none() {
                    if let Some(&c) = remaining.iter()
                        .find(|&&c| pending.iter().all(|&(_, after)| after != c))
                    {
                        remaining.retain(|&r| r != c);
                        *w = Some((c, t + (c - b'A') as u32 + 61));
                    }
                }
            }
            match workers.iter().filter_map(|w| w.map(|(_, done_at)| done_at)).min() {
                Some(next_t) => t = next_t,
                None => return t.to_string()
            }
        }
    }
}

fn day8(part: u8, input: &str) -> String {
    fn node_value(nums: &mut impl Iterator<Item = usize>, part: u8) -> usize {
        let children = nums.next().expect("truncated node header");
        let metas = nums.next().expect("truncated node header");
        let child_values: Vec<usize> = (0 .. children).map(|_| node_value(nums, part)).collect();
        let meta_values: Vec<usize> =
            (0 .. metas).map(|_| nums.next().expect("truncated metadata")).collect();
        if part == 1 {
            child_values.iter().sum::<usize>() + meta_values.iter().sum::<usize>()
        } else if children == 0 {
            meta_values.iter().sum()
        } else {
            meta_values.iter()
                .filter_map(|&m| m.checked_sub(1).and_then(|i| child_values.get(i)))
                .sum()
        }
    }

    let mut nums = input.trim().split(' ').map(|n| n.parse().expect(n));
    let value = node_value(&mut nums, part);
    assert_eq!(nums.next(), None, "trailing numbers after the root node");
    value.to_string()
}

fn day9(part: u8, input: &str) -> String {
    // N players; last marble is worth M points
    let words: Vec<&str> = input.trim().split(' ').collect();
    let players: usize = words[0].parse().expect("player count");
    let last_marble =
        words[6].parse::<usize>().expect("last marble") * if part == 1 {1} else {100};

    // the circle lives in a deque with the current marble at the back
    let mut circle: VecDeque<usize> = VecDeque::with_capacity(last_marble + 1);
    circle.push_back(0);
    let mut scores = vec![0usize; players];
    for marble in 1 ..= last_marble {
        if marble % 23 == 0 {
            for _ in 0 .. 7 {
                let back = circle.pop_back().unwrap();
                circle.push_front(back);
            }
            scores[marble % players] += marble + circle.pop_back().unwrap();
            let front = circle.pop_front().unwrap();
            circle.push_back(front);
        } else {
            let front = circle.pop_front().unwrap();
            circle.push_back(front);
            circle.push_back(marble);
        }
    }
    scores.iter().max().unwrap().to_string()
}

fn day10(part: u8, input: &str) -> String {
    let re = Regex::new(r"position=<\s*(-?\d+),\s*(-?\d+)> velocity=<\s*(-?\d+),\s*(-?\d+)>")
        .unwrap();
    let pts: Vec<[i64; 4]> = re.captures_iter(input).map(|m|
        [1, 2, 3, 4].map(|i| m[i].parse().expect("point field"))
    ).collect();
    assert!(!pts.is_empty(), "no points parsed");

    // the bounding box shrinks until the message appears, then grows again
    let height_at = |t: i64| {
        let (min, max) = pts.iter().map(|p| p[1] + p[3] * t).minmax().into_option().unwrap();
        max - min
    };
    let mut t = 0;
    while height_at(t + 1) < height_at(t) {t += 1}
    if part == 2 {return t.to_string()}

    let (minx, maxx) = pts.iter().map(|p| p[0] + p[2] * t).minmax().into_option().unwrap();
    let (miny, maxy) = pts.iter().map(|p| p[1] + p[3] * t).minmax().into_option().unwrap();
    let mut grid =
        vec![vec![b'.'; (maxx - minx + 1) as usize]; (maxy - miny + 1) as usize];
    for p in &pts {
        grid[(p[1] + p[3] * t - miny) as usize][(p[0] + p[2] * t - minx) as usize] = b'#';
    }
    grid.into_iter().map(|row| String::from_utf8(row).unwrap()).join("\n")
}

fn day11(part: u8, input: &str) -> String {
    let serial: i64 = input.trim().parse().expect("serial number");
    let power = |x: i64, y: i64| ((x + 10) * y + serial) * (x + 10) / 100 % 10 - 5;

    // sums[y][x] = total power of the rectangle (1, 1) ..= (x, y)
    let mut sums = vec![vec![0i64; 301]; 301];
    for y in 1 ..= 300 { for x in 1 ..= 300 {
        sums[y][x] = power(x as i64, y as i64)
                   + sums[y - 1][x] + sums[y][x - 1] - sums[y - 1][x - 1];
    }}
    let square = |x: usize, y: usize, d: usize|
        sums[y + d - 1][x + d - 1] - sums[y - 1][x + d - 1]
      - sums[y + d - 1][x - 1] + sums[y - 1][x - 1];

    if part == 1 {
        let (x, y) = (1 ..= 298).flat_map(|y| (1 ..= 298).map(move |x| (x, y)))
            .max_by_key(|&(x, y)| square(x, y, 3)).unwrap();
        format!("{},{}", x, y)
    } else {
        let (x, y, d) = (1 ..= 300).flat_map(|d|
            (1 ..= 301 - d).flat_map(move |y| (1 ..= 301 - d).map(move |x| (x, y, d)))
        ).max_by_key(|&(x, y, d)| square(x, y, d)).unwrap();
        format!("{},{},{}", x, y, d)
    }
}

fn day12(part: u8, input: &str) -> String {
    fn trimmed(state: &[u8]) -> (usize, &[u8]) {
        match (state.iter().position(|&p| p != 0), state.iter().rposition(|&p| p != 0)) {
            (Some(first), Some(last)) => (first, &state[first ..= last]),
            _ => (0, &state[.. 0])
        }
    }
    fn plant_sum(state: &[u8], offset: i64) -> i64 {
        (offset ..).zip(state).filter(|&(_, &p)| p != 0).map(|(i, _)| i).sum()
    }

    let mut lines = input.trim().lines();
    let header = lines.next().expect("empty input");
    let mut state: Vec<u8> = header.strip_prefix("initial state: ").expect(header)
        .bytes().map(|c| (c == b'#') as u8).collect();
    assert_eq!(lines.next(), Some(""));
    let mut rules = bitarr![0; 32];
    for line in lines {
        let (pattern, result) = line.split_once(" => ").expect(line);
        let ix = pattern.bytes().fold(0, |a, c| 2 * a + (c == b'#') as usize);
        rules.set(ix, result == "#");
    }

    let generations: u64 = if part == 1 {20} else {50_000_000_000};
    let mut offset = 0i64;
    for gen in 1 ..= generations {
        // keep four empty pots of padding on both sides
        while state.iter().take(4).any(|&p| p != 0) {
            state.insert(0, 0);
            offset -= 1;
        }
        while state.iter().rev().take(4).any(|&p| p != 0) {state.push(0)}

        let mut next = vec![0u8; state.len()];
        for i in 2 .. state.len() - 2 {
            let ix = state[i - 2 ..= i + 2].iter().fold(0, |a, &b| 2 * a + b as usize);
            next[i] = rules[ix] as u8;
        }

        let (old_at, old_plants) = trimmed(&state);
        let (new_at, new_plants) = trimmed(&next);
        if part == 2 && old_plants == new_plants {
            // the pattern glides at a constant rate from here on; extrapolate
            let shift = new_at as i64 - old_at as i64;
            return plant_sum(&next, offset + shift * (generations - gen) as i64).to_string();
        }
        state = next;
    }
    plant_sum(&state, offset).to_string()
}

fn day13(part: u8, input: &str) -> String {
    struct Cart {x: usize, y: usize, dx: isize, dy: isize, turns: usize, alive: bool}

    let mut map: Vec<Vec<u8>> = input.lines().map(|line| line.as_bytes().to_vec()).collect();
    let mut carts: Vec<Cart> = vec![];
    for (y, row) in map.iter_mut().enumerate() {
        for (x, c) in row.iter_mut().enumerate() {
            let (dx, dy) = match *c {
                b'^' => (0, -1), b'v' => (0, 1), b'<' => (-1, 0), b'>' => (1, 0),
                _ => continue
            };
            *c = if dx == 0 {b'|'} else {b'-'};
            carts.push(Cart {x, y, dx, dy, turns: 0, alive: true});
        }
    }

    loop {
        carts.sort_unstable_by_key(|cart| (cart.y, cart.x));
        for i in 0 .. carts.len() {
            if !carts[i].alive {continue}
            let cart = &mut carts[i];
            cart.x = (cart.x as isize + cart.dx) as usize;
            cart.y = (cart.y as isize + cart.dy) as usize;
            (cart.dx, cart.dy) = match map[cart.y][cart.x] {
                b'/'  => (-cart.dy, -cart.dx),
                b'\\' => (cart.dy, cart.dx),
                b'+'  => {
                    cart.turns += 1;
                    match cart.turns % 3 {
                        1 => (cart.dy, -cart.dx),   // left
                        2 => (cart.dx, cart.dy),    // straight
                        _ => (-cart.dy, cart.dx)    // right
                    }
                }
                b'|' | b'-' => (cart.dx, cart.dy),
                c => panic!("cart ran off the tracks onto '{}'", c as char)
            };
            let (cx, cy) = (carts[i].x, carts[i].y);
            for j in 0 .. carts.len() {
                if j != i && carts[j].alive && carts[j].x == cx && carts[j].y == cy {
                    if part == 1 {return format!("{},{}", cx, cy)}
                    carts[i].alive = false;
                    carts[j].alive = false;
                }
            }
        }
        carts.retain(|cart| cart.alive);
        if carts.len() == 1 {return format!("{},{}", carts[0].x, carts[0].y)}
    }
}

fn day14(part: u8, input: &str) -> String {
    let input = input.trim();
    let goal: usize = input.parse().expect(input);
    let pattern: Vec<u8> = input.bytes().map(|c| c - b'0').collect();

    let mut recipes: Vec<u8> = vec![3, 7];
    let mut elf1 = 0;
    let mut elf2 = 1;
    let ends_with_pattern = |recipes: &[u8]|
        recipes.len() >= pattern.len() && recipes[recipes.len() - pattern.len() ..] == pattern[..];
    loop {
        let sum = recipes[elf1] + recipes[elf2];
        if sum >= 10 {
            recipes.push(1);
            if part == 2 && ends_with_pattern(&recipes) {
                return (recipes.len() - pattern.len()).to_string();
            }
        }
        recipes.push(sum % 10);
        if part == 2 && ends_with_pattern(&recipes) {
            return (recipes.len() - pattern.len()).to_string();
        }
        if part == 1 && recipes.len() >= goal + 10 {
            return recipes[goal .. goal + 10].iter().map(|&d| (d + b'0') as char).collect();
        }
        elf1 = (elf1 + recipes[elf1] as usize + 1) % recipes.len();
        elf2 = (elf2 + recipes[elf2] as usize + 1) % recipes.len();
    }
}

fn day15(part: u8, input: &str) -> String {
    #[derive(Clone)]
    struct Unit {x: usize, y: usize, kind: u8, hp: i32}

    // neighbours in reading order; the map is walled so this never underflows
    fn adjacent(x: usize, y: usize) -> [(usize, usize); 4] {
        [(x, y - 1), (x - 1, y), (x + 1, y), (x, y + 1)]
    }

    fn open_neighbors(map: &[Vec<u8>], x: usize, y: usize) -> ArrayVec<(usize, usize), 4> {
        adjacent(x, y).into_iter().filter(|&(nx, ny)| map[ny][nx] == b'.').collect()
    }

    fn distances(map: &[Vec<u8>], from: (usize, usize)) -> FxHashMap<(usize, usize), u32> {
        let mut dist = FxHashMap::default();
        dist.insert(from, 0);
        let mut frontier = vec![from];
        let mut d = 0;
        while !frontier.is_empty() {
            d += 1;
            let mut next = vec![];
            for &(x, y) in &frontier {
                for (nx, ny) in open_neighbors(map, x, y) {
                    if !dist.contains_key(&(nx, ny)) {
                        dist.insert((nx, ny), d);
                        next.push((nx, ny));
                    }
                }
            }
            frontier = next;
        }
        dist
    }

    // the first step toward the nearest enemy-adjacent square, if one is reachable;
    // both the square and the step break distance ties in reading order
    fn step_towards(map: &[Vec<u8>], from: (usize, usize), enemy: u8)
    -> Option<(usize, usize)> {
        let dist = distances(map, from);
        let mut targets: Vec<(usize, usize)> = vec![];
        for (y, row) in map.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c == enemy {
                    targets.extend(
                        open_neighbors(map, x, y).into_iter().filter(|p| dist.contains_key(p))
                    );
                }
            }
        }
        let &(tx, ty) = targets.iter().min_by_key(|&&(x, y)| (dist[&(x, y)], y, x))?;
        let back = distances(map, (tx, ty));
        adjacent(from.0, from.1).into_iter()
            .filter(|p| back.contains_key(p))
            .min_by_key(|&(x, y)| (back[&(x, y)], y, x))
    }

    // runs one battle to the end; returns the outcome and whether every elf survived
    fn battle(mut map: Vec<Vec<u8>>, elf_power: i32) -> (i32, bool) {
        let mut units: Vec<Unit> = vec![];
        for (y, row) in map.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c == b'E' || c == b'G' {units.push(Unit {x, y, kind: c, hp: 200})}
            }
        }
        let elves = units.iter().filter(|u| u.kind == b'E').count();

        let mut rounds = 0;
        let outcome = 'combat: loop {
            units.sort_unstable_by_key(|u| (u.y, u.x));
            for i in 0 .. units.len() {
                if units[i].hp <= 0 {continue}
                let kind = units[i].kind;
                let enemy = if kind == b'E' {b'G'} else {b'E'};
                if !units.iter().any(|u| u.hp > 0 && u.kind == enemy) {
                    let hp: i32 = units.iter().filter(|u| u.hp > 0).map(|u| u.hp).sum();
                    break 'combat rounds * hp;
                }

                let (ux, uy) = (units[i].x, units[i].y);
                if !adjacent(ux, uy).iter().any(|&(x, y)| map[y][x] == enemy) {
                    if let Some((nx, ny)) = step_towards(&map, (ux, uy), enemy) {
                        map[uy][ux] = b'.';
                        map[ny][nx] = kind;
                        units[i].x = nx;
                        units[i].y = ny;
                    }
                }

                let (ux, uy) = (units[i].x, units[i].y);
                let target = (0 .. units.len()).filter(|&j|
                    units[j].hp > 0 && units[j].kind == enemy &&
                    ux.abs_diff(units[j].x) + uy.abs_diff(units[j].y) == 1
                ).min_by_key(|&j| (units[j].hp, units[j].y, units[j].x));
                if let Some(j) = target {
                    units[j].hp -= if kind == b'E' {elf_power} else {3};
                    if units[j].hp <= 0 {
                        map[units[j].y][units[j].x] = b'.';
                    }
                }
            }
            units.retain(|u| u.hp > 0);
            rounds += 1;
        };
        let flawless = units.iter().filter(|u| u.hp > 0 && u.kind == b'E').count() == elves;
        (outcome, flawless)
    }

    let map: Vec<Vec<u8>> =
        input.trim_matches('\n').lines().map(|line| line.as_bytes().to_vec()).collect();
    if part == 1 {
        battle(map, 3).0.to_string()
    } else {
        (4 ..).find_map(|power| {
            let (outcome, flawless) = battle(map.clone(), power);
            flawless.then_some(outcome)
        }).unwrap().to_string()
    }
}

fn day16(part: u8, input: &str) -> String {
    type Regs = [usize; 4];
    // addr addi mulr muli banr bani borr bori setr seti gtir gtri gtrr eqir eqri eqrr
    fn apply(op: usize, regs: Regs, a: usize, b: usize) -> usize {
        match op {
            0  => regs[a] + regs[b],
            1  => regs[a] + b,
            2  => regs[a] * regs[b],
            3  => regs[a] * b,
            4  => regs[a] & regs[b],
            5  => regs[a] & b,
            6  => regs[a] | regs[b],
            7  => regs[a] | b,
            8  => regs[a],
            9  => a,
            10 => (a > regs[b]) as usize,
            11 => (regs[a] > b) as usize,
            12 => (regs[a] > regs[b]) as usize,
            13 => (a == regs[b]) as usize,
            14 => (regs[a] == b) as usize,
            _  => (regs[a] == regs[b]) as usize
        }
    }

    let num_re = Regex::new(r"\d+").unwrap();
    let numbers = |s: &str| -> Vec<usize> {
        num_re.find_iter(s).map(|m| m.as_str().parse().expect("number")).collect()
    };

    let mut samples: Vec<(Regs, Vec<usize>, Regs)> = vec![];
    let mut program: Vec<Vec<usize>> = vec![];
    for block in input.trim().split("\n\n") {
        let block = block.trim();
        if block.is_empty() {continue}
        if block.starts_with("Before") {
            let lines: Vec<&str> = block.lines().collect();
            let [before, instr, after] = &lines[..] else {
                panic!("cannot parse sample {}", block)
            };
            samples.push((
                numbers(before).try_into().expect(before),
                numbers(instr),
                numbers(after).try_into().expect(after)
            ));
        } else {
            program.extend(block.lines().map(&numbers));
        }
    }

    let behaves_like = |before: Regs, instr: &[usize], after: Regs| {
        let mut set = bitarr![0; 16];
        for op in 0 .. 16 {
            let mut regs = before;
            regs[instr[3]] = apply(op, before, instr[1], instr[2]);
            set.set(op, regs == after);
        }
        set
    };

    if part == 1 {
        samples.iter().filter(|(before, instr, after)|
            behaves_like(*before, instr, *after)[.. 16].count_ones() >= 3
        ).count().to_string()
    } else {
        let mut candidates = [(); 16].map(|_| bitarr![1; 16]);
        for (before, instr, after) in &samples {
            let set = behaves_like(*before, instr, *after);
            for op in 0 .. 16 {
                if !set[op] {candidates[instr[0]].set(op, false)}
            }
        }
        // eliminate: some opcode number is always down to a single operation
        let mut mapping: Vec<(usize, usize)> = vec![];
        while mapping.len() < 16 {
            let num = (0 .. 16).find(|&n|
                AssocExt::get(&mapping, &n).is_none() && candidates[n][.. 16].count_ones() == 1
            ).expect("opcode deduction is stuck");
            let op = candidates[num][.. 16].first_one().unwrap();
            mapping.push((num, op));
            for other in 0 .. 16 {
                if other != num {candidates[other].set(op, false)}
            }
        }

        let mut regs = [0; 4];
        for instr in &program {
            let &[num, a, b, c] = &instr[..] else {
                panic!("cannot parse instruction {:?}", instr)
            };
            regs[c] = apply(*AssocExt::get(&mapping, &num).unwrap(), regs, a, b);
        }
        regs[0].to_string()
    }
}

fn day17(part: u8, input: &str) -> String {
    // pours water into (x, y); true if the tile ends up clay or settled water
    fn fill(grid: &mut Vec<Vec<u8>>, x: usize, y: usize) -> bool {
        if y >= grid.len() {return false}
        match grid[y][x] {
            b'#' | b'~' => return true,
            b'|' => return false,
            _ => {}
        }
        grid[y][x] = b'|';
        if !fill(grid, x, y + 1) {return false}

        // supported from below: spread sideways until a wall or a drop
        let mut left = x;
        let mut left_wall = false;
        loop {
            if grid[y][left - 1] == b'#' {left_wall = true; break}
            left -= 1;
            grid[y][left] = b'|';
            if !fill(grid, left, y + 1) {break}
        }
        let mut right = x;
        let mut right_wall = false;
        loop {
            if grid[y][right + 1] == b'#' {right_wall = true; break}
            right += 1;
            grid[y][right] = b'|';
            if !fill(grid, right, y + 1) {break}
        }
        if left_wall && right_wall {
            grid[y][left ..= right].fill(b'~');
            return true;
        }
        false
    }

    let re = Regex::new(r"([xy])=(\d+), [xy]=(\d+)\.\.(\d+)").unwrap();
    let mut clay: FxHashSet<(usize, usize)> = FxHashSet::default();
    for m in re.captures_iter(input) {
        let fixed: usize = m[2].parse().unwrap();
        let lo: usize = m[3].parse().unwrap();
        let hi: usize = m[4].parse().unwrap();
        for v in lo ..= hi {
            clay.insert(if &m[1] == "x" {(fixed, v)} else {(v, fixed)});
        }
    }
    let (minx, maxx) = clay.iter().map(|&(x, _)| x).minmax().into_option().expect("no clay");
    let (miny, maxy) = clay.iter().map(|&(_, y)| y).minmax().into_option().unwrap();

    // one spare column on each side for water running off the outermost walls
    let offset = minx - 1;
    let mut grid = vec![vec![b'.'; maxx - minx + 3]; maxy + 1];
    for &(x, y) in &clay {grid[y][x - offset] = b'#'}
    fill(&mut grid, 500 - offset, 0);

    let wet = grid[miny ..= maxy].iter().flatten();
    if part == 1 {
        wet.filter(|&&c| matches!(c, b'|' | b'~')).count().to_string()
    } else {
        wet.filter(|&&c| c == b'~').count().to_string()
    }
}

fn day20(part: u8, input: &str) -> String {
    // walk the route regex, tracking the fewest doors to every room passed through
    let mut dist: FxHashMap<(i32, i32), u32> = FxHashMap::default();
    let mut stack: Vec<((i32, i32), u32)> = vec![];
    let mut here = (0i32, 0i32);
    let mut d = 0u32;
    dist.insert(here, 0);
    for c in input.trim().bytes() {
        match c {
            b'^' | b'$' => {}
            b'(' => stack.push((here, d)),
            b'|' => (here, d) = *stack.last().expect("unbalanced branch"),
            b')' => (here, d) = stack.pop().expect("unbalanced branch"),
            b'N' | b'E' | b'S' | b'W' => {
                here = match c {
                    b'N' => (here.0, here.1 - 1),
                    b'S' => (here.0, here.1 + 1),
                    b'E' => (here.0 + 1, here.1),
                    _    => (here.0 - 1, here.1)
                };
                d += 1;
                let entry = dist.entry(here).or_insert(d);
                *entry = (*entry).min(d);
                d = *entry;
            }
            _ => panic!("unexpected character '{}' in the route", c as char)
        }
    }

    if part == 1 {
        dist.values().max().unwrap().to_string()
    } else {
        dist.values().filter(|&&d| d >= 1000).count().to_string()
    }
}

fn day23(part: u8, input: &str) -> String {
    let re = Regex::new(r"pos=<(-?\d+),(-?\d+),(-?\d+)>, r=(\d+)").unwrap();
    let bots: Vec<[i64; 4]> = re.captures_iter(input).map(|m|
        [1, 2, 3, 4].map(|i| m[i].parse().expect("nanobot field"))
    ).collect();
    assert!(!bots.is_empty(), "no nanobots parsed");

    if part == 1 {
        let strongest = bots.iter().max_by_key(|b| b[3]).unwrap();
        bots.iter().filter(|b|
            (b[0] - strongest[0]).abs() + (b[1] - strongest[1]).abs()
                + (b[2] - strongest[2]).abs() <= strongest[3]
        ).count().to_string()
    } else {
        // best-first search over cubes: count the bots whose range touches a cube,
        // split the best cube into octants until it is a single point
        let in_range = |x: i64, y: i64, z: i64, size: i64| bots.iter().filter(|b| {
            (x - b[0]).max(b[0] - (x + size - 1)).max(0)
                + (y - b[1]).max(b[1] - (y + size - 1)).max(0)
                + (z - b[2]).max(b[2] - (z + size - 1)).max(0) <= b[3]
        }).count();
        let to_origin = |x: i64, y: i64, z: i64, size: i64|
            x.max(-(x + size - 1)).max(0)
                + y.max(-(y + size - 1)).max(0)
                + z.max(-(z + size - 1)).max(0);

        let (min, max) =
            bots.iter().flat_map(|b| b[.. 3].iter().copied()).minmax().into_option().unwrap();
        let mut size = 1i64;
        while size < max - min + 1 {size *= 2}

        let mut heap = BinaryHeap::new();
        heap.push((
            in_range(min, min, min, size),
            Reverse(to_origin(min, min, min, size)),
            Reverse(size),
            (min, min, min)
        ));
        while let Some((_, Reverse(origin_dist), Reverse(size), (x, y, z))) = heap.pop() {
            if size == 1 {return origin_dist.to_string()}
            let half = size / 2;
            for &nx in &[x, x + half] { for &ny in &[y, y + half] { for &nz in &[z, z + half] {
                heap.push((
                    in_range(nx, ny, nz, half),
                    Reverse(to_origin(nx, ny, nz, half)),
                    Reverse(half),
                    (nx, ny, nz)
                ));
            }}}
        }
        unreachable!()
    }
}

fn unsolved(_part: u8, _input: &str) -> String {
    panic!("no solution for this day")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let days = [
        day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12,
        day13, day14, day15, day16, day17, unsolved, unsolved, day20, unsolved, unsolved, day23
    ];

    let args = std::env::args().collect::<Vec<_>>();
    let (day_arg, part_arg, fname) = match &args[..] {
        [_, day_arg, part_arg] => (day_arg, part_arg, format!("day{}.in", day_arg)),
        [_, day_arg, part_arg, fname] => (day_arg, part_arg, fname.clone()),
        _ => {
            println!("usage: aoc2018 <day> <1|2> [input-file, - for stdin]");
            std::process::exit(1);
        }
    };

    assert!(part_arg == "1" || part_arg == "2");
    let day: usize = day_arg.parse()?;
    assert!((1 ..= days.len()).contains(&day), "no such day");
    let input = if fname == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(&fname).map_err(|e| format!("{}: {}", fname, e))?
    };
    let time = std::time::Instant::now();
    println!("{}", days[day - 1](part_arg.parse()?, &input));
    println!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day1_examples() {
        assert_eq!(day1(1, "+1\n-2\n+3\n+1"), "3");
        assert_eq!(day1(2, "+3\n+3\n+4\n-2\n-4"), "10");
        assert_eq!(day1(2, "+7\n+7\n-2\n-7\n-4"), "14");
    }

    #[test]
    fn day2_examples() {
        assert_eq!(day2(1, "abcdef\nbababc\nabbcde\nabcccd\naabcdd\nabcdee\nababab"), "12");
        assert_eq!(day2(2, "abcde\nfghij\nklmno\npqrst\nfguij\naxcye\nwvxyz"), "fgij");
    }

    #[test]
    fn day3_examples() {
        let input = "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2";
        assert_eq!(day3(1, input), "4");
        assert_eq!(day3(2, input), "3");
    }

    #[test]
    fn day4_examples() {
        let input = "\
[1518-11-01 00:00] Guard #10 begins shift
[1518-11-01 00:05] falls asleep
[1518-11-01 00:25] wakes up
[1518-11-01 00:30] falls asleep
[1518-11-01 00:55] wakes up
[1518-11-01 23:58] Guard #99 begins shift
[1518-11-02 00:40] falls asleep
[1518-11-02 00:50] wakes up
[1518-11-03 00:05] Guard #10 begins shift
[1518-11-03 00:24] falls asleep
[1518-11-03 00:29] wakes up
[1518-11-04 00:02] Guard #99 begins shift
[1518-11-04 00:36] falls asleep
[1518-11-04 00:46] wakes up
[1518-11-05 00:03] Guard #99 begins shift
[1518-11-05 00:45] falls asleep
[1518-11-05 00:55] wakes up";
        assert_eq!(day4(1, input), "240");
        assert_eq!(day4(2, input), "4455");
    }

    #[test]
    fn day5_examples() {
        assert_eq!(day5(1, "dabAcCaCBAcCcaDA"), "10");
        assert_eq!(day5(2, "dabAcCaCBAcCcaDA"), "4");
    }

    #[test]
    fn day6_examples() {
        assert_eq!(day6(1, "1, 1\n1, 6\n8, 3\n3, 4\n5, 5\n8, 9"), "17");
    }

    #[test]
    fn day7_examples() {
        let input = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.";
        assert_eq!(day7(1, input), "CABDFE");
    }

    #[test]
    fn day8_examples() {
        let input = "2 3 0 3 10 11 12 1 1 0 1 99 2 1 1 2";
        assert_eq!(day8(1, input), "138");
        assert_eq!(day8(2, input), "66");
    }

    #[test]
    fn day9_examples() {
        assert_eq!(day9(1, "9 players; last marble is worth 25 points"), "32");
        assert_eq!(day9(1, "10 players; last marble is worth 1618 points"), "8317");
        assert_eq!(day9(1, "13 players; last marble is worth 7999 points"), "146373");
        assert_eq!(day9(1, "30 players; last marble is worth 5807 points"), "37305");
    }

    #[test]
    fn day10_examples() {
        let input = "\
position=< 9,  1> velocity=< 0,  2>
position=< 7,  0> velocity=<-1,  0>
position=< 3, -2> velocity=<-1,  1>
position=< 6, 10> velocity=<-2, -1>
position=< 2, -4> velocity=< 2,  2>
position=<-6, 10> velocity=< 2, -2>
position=< 1,  8> velocity=< 1, -1>
position=< 1,  7> velocity=< 1,  0>
position=<-3, 11> velocity=< 1, -2>
position=< 7,  6> velocity=<-1, -1>
position=<-2,  3> velocity=< 1,  0>
position=<-4,  3> velocity=< 2,  0>
position=<10, -3> velocity=<-1,  1>
position=< 5, 11> velocity=< 1, -2>
position=< 4,  7> velocity=< 0, -1>
position=< 8, -2> velocity=< 0,  1>
position=<15,  0> velocity=<-2,  0>
position=< 1,  6> velocity=< 1,  0>
position=< 8,  9> velocity=< 0, -1>
position=< 3,  3> velocity=<-1,  1>
position=< 0,  5> velocity=< 0, -1>
position=<-2,  2> velocity=< 2,  0>
position=< 5, -2> velocity=< 1,  2>
position=< 1,  4> velocity=< 2,  1>
position=<-2,  7> velocity=< 2, -2>
position=< 3,  6> velocity=<-1, -1>
position=< 5,  0> velocity=< 1,  0>
position=<-6,  0> velocity=< 2,  0>
position=< 5,  9> velocity=< 1, -2>
position=<14,  7> velocity=<-2,  0>
position=<-3,  6> velocity=< 2, -1>";
        let message = "\
#...#..###
#...#...#.
#...#...#.
#####...#.
#...#...#.
#...#...#.
#...#...#.
#...#..###";
        assert_eq!(day10(1, input), message);
        assert_eq!(day10(2, input), "3");
    }

    #[test]
    fn day11_examples() {
        assert_eq!(day11(1, "18"), "33,45");
        assert_eq!(day11(1, "42"), "21,61");
        assert_eq!(day11(2, "18"), "90,269,16");
    }

    #[test]
    fn day12_examples() {
        let input = "\
initial state: #..#.#..##......###...###

...## => #
..#.. => #
.#... => #
.#.#. => #
.#.## => #
.##.. => #
.#### => #
#.#.# => #
#.### => #
##.#. => #
##.## => #
###.. => #
###.# => #
####. => #";
        assert_eq!(day12(1, input), "325");
    }

    #[test]
    fn day13_examples() {
        let first_crash = r"/->-\
|   |  /----\
| /-+--+-\  |
| | |  | v  |
\-+-/  \-+--/
  \------/   ";
        assert_eq!(day13(1, first_crash), "7,3");
        let last_cart = r"/>-<\
|   |
| /<+-\
| | | v
\>+</ |
  |   ^
  \<->/";
        assert_eq!(day13(2, last_cart), "6,4");
    }

    #[test]
    fn day14_examples() {
        assert_eq!(day14(1, "9"), "5158916779");
        assert_eq!(day14(1, "5"), "0124515891");
        assert_eq!(day14(1, "18"), "9251071085");
        assert_eq!(day14(1, "2018"), "5941429882");
        assert_eq!(day14(2, "51589"), "9");
        assert_eq!(day14(2, "92510"), "18");
        assert_eq!(day14(2, "59414"), "2018");
    }

    #[test]
    fn day15_examples() {
        let main = "\
#######
#.G...#
#...EG#
#.#.#G#
#..G#E#
#.....#
#######";
        assert_eq!(day15(1, main), "27730");
        assert_eq!(day15(2, main), "4988");
        let elves_ahead = "\
#######
#E..EG#
#.#G.E#
#E.##E#
#G..#.#
#..E#.#
#######";
        assert_eq!(day15(1, elves_ahead), "39514");
        let walled_corner = "\
#######
#.E...#
#.#..G#
#.###.#
#E#G#G#
#...#G#
#######";
        assert_eq!(day15(1, walled_corner), "28944");
        assert_eq!(day15(2, walled_corner), "6474");
    }

    #[test]
    fn day16_examples() {
        let input = "Before: [3, 2, 1, 1]\n9 2 1 2\nAfter:  [3, 2, 2, 1]";
        assert_eq!(day16(1, input), "1");
    }

    #[test]
    fn day17_examples() {
        let input = "\
x=495, y=2..7
y=7, x=495..501
x=501, y=3..7
x=498, y=2..4
x=506, y=1..2
x=498, y=10..13
x=504, y=10..13
y=13, x=498..504";
        assert_eq!(day17(1, input), "57");
        assert_eq!(day17(2, input), "29");
    }

    #[test]
    fn day20_examples() {
        assert_eq!(day20(1, "^WNE$"), "3");
        assert_eq!(day20(1, "^ENWWW(NEEE|SSE(EE|N))$"), "10");
        assert_eq!(day20(1, "^ENNWSWW(NEWS|)SSSEEN(WNSE|)EE(SWEN|)NNN$"), "18");
        assert_eq!(day20(1, "^ESSWWN(E|NNENN(EESS(WNSE|)SSS|WWWSSSSE(SW|NNNE)))$"), "23");
        assert_eq!(
            day20(1, "^WSSEESWWWNW(S|NENNEEEENN(ESSSSW(NWSW|SSEN)|WSWWN(E|WWS(E|SS))))$"),
            "31"
        );
    }

    #[test]
    fn day23_examples() {
        let strongest = "\
pos=<0,0,0>, r=4
pos=<1,0,0>, r=1
pos=<4,0,0>, r=3
pos=<0,2,0>, r=1
pos=<0,5,0>, r=3
pos=<0,0,3>, r=1
pos=<1,1,1>, r=1
pos=<1,1,2>, r=1
pos=<1,3,1>, r=1";
        assert_eq!(day23(1, strongest), "7");
        let crowded = "\
pos=<10,12,12>, r=2
pos=<12,14,12>, r=2
pos=<16,12,12>, r=4
pos=<14,14,14>, r=6
pos=<50,50,50>, r=200
pos=<10,10,10>, r=5";
        assert_eq!(day23(2, crowded), "36");
    }
}
