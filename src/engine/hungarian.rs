// ==========================================
// 列车入段排位系统 - 最小代价完美匹配
// ==========================================
// 算法: Hungarian (Kuhn-Munkres),行/列势函数 + 最短增广路, O(n^3)
// 红线: 全局最优,不是贪心
// 红线: 同一输入必须得到同一匹配 (平局按列下标从小到大)
// ==========================================

/// 求解方阵的最小代价完美匹配
///
/// # 参数
/// - cost: n×n 方阵,所有元素必须为有限数
///
/// # 返回
/// - Vec<usize>: result[row] = 匹配到的列
pub fn min_cost_perfect_matching(cost: &[Vec<f64>]) -> Vec<usize> {
    let n = cost.len();
    if n == 0 {
        return Vec::new();
    }
    debug_assert!(cost.iter().all(|row| row.len() == n), "代价矩阵必须为方阵");

    // 1-based 下标,第 0 列为虚拟起点
    let mut u = vec![0.0_f64; n + 1]; // 行势
    let mut v = vec![0.0_f64; n + 1]; // 列势
    let mut p = vec![0_usize; n + 1]; // p[j] = 匹配到列 j 的行 (0 表示未匹配)
    let mut way = vec![0_usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        // === 寻找最短增广路 ===
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            // 非有限输入时兜底,避免死循环
            if j1 == 0 {
                j1 = (1..=n).find(|&j| !used[j]).unwrap_or(0);
                delta = 0.0;
                if j1 == 0 {
                    break;
                }
            }

            // === 更新势函数 ===
            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // === 沿增广路翻转匹配 ===
        while j0 != 0 {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
        }
    }

    let mut assignment = vec![0; n];
    for j in 1..=n {
        if p[j] != 0 {
            assignment[p[j] - 1] = j - 1;
        }
    }
    assignment
}

/// 匹配总代价
pub fn matching_cost(cost: &[Vec<f64>], assignment: &[usize]) -> f64 {
    assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| cost[row][col])
        .sum()
}
