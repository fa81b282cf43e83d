use std::env;
use std::fs;
use std::io::Read;
use std::process;
use std::time::Instant;

use tdpath::*;

fn print_usage() {
    eprintln!("tdpath — 木分解上の転送行列法による最長路母関数計算");
    eprintln!();
    eprintln!("使い方:");
    eprintln!("  tdpath compute [グラフファイル] [オプション]  最長路母関数を計算");
    eprintln!("  tdpath tree    [グラフファイル] [オプション]  木分解のみ構築して表示");
    eprintln!("  tdpath verify  [グラフファイル] [オプション]  全探索との一致検証");
    eprintln!();
    eprintln!("グラフファイルは 1 行 1 辺（頂点 id 2 つ）の辺リスト。");
    eprintln!("省略または \"-\" で標準入力から読む。");
    eprintln!();
    eprintln!("オプション:");
    eprintln!("  --degree          最小次数ヒューリスティック（デフォルト）");
    eprintln!("  --fill-in         最小 fill-in ヒューリスティック");
    eprintln!("  --local-degree    局所最小次数ヒューリスティック");
    eprintln!("  --local-fill-in   局所最小 fill-in ヒューリスティック");
    eprintln!("  --order <v0,v1,...>  消去順序を直接指定");
    eprintln!("  --direct          CRT を使わず多倍長整数で直接計算");
    eprintln!("  --print-tree      木分解を stderr に表示");
    eprintln!();
    eprintln!("例:");
    eprintln!("  tdpath compute graph.txt");
    eprintln!("  tdpath compute graph.txt --fill-in --print-tree");
    eprintln!("  tdpath compute graph.txt --order 0,1,2,3 --direct");
}

#[derive(Clone, Copy, PartialEq)]
enum Heuristic {
    Degree,
    FillIn,
    LocalDegree,
    LocalFillIn,
}

struct Options {
    input: Option<String>,
    heuristic: Heuristic,
    order: Option<Vec<u32>>,
    direct: bool,
    print_tree: bool,
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options {
        input: None,
        heuristic: Heuristic::Degree,
        order: None,
        direct: false,
        print_tree: false,
    };
    let mut picked = 0;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--degree" => {
                opts.heuristic = Heuristic::Degree;
                picked += 1;
            }
            "--fill-in" => {
                opts.heuristic = Heuristic::FillIn;
                picked += 1;
            }
            "--local-degree" => {
                opts.heuristic = Heuristic::LocalDegree;
                picked += 1;
            }
            "--local-fill-in" => {
                opts.heuristic = Heuristic::LocalFillIn;
                picked += 1;
            }
            "--order" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| {
                    eprintln!("--order には消去順序の指定が必要です");
                    process::exit(1);
                });
                opts.order = Some(parse_order(value));
                picked += 1;
            }
            "--direct" => opts.direct = true,
            "--print-tree" => opts.print_tree = true,
            s if s.starts_with("--") => {
                eprintln!("不明なオプション: {}", s);
                process::exit(1);
            }
            s => {
                if opts.input.is_some() {
                    eprintln!("入力ファイルが複数指定されています: {}", s);
                    process::exit(1);
                }
                opts.input = Some(s.to_string());
            }
        }
        i += 1;
    }

    if picked > 1 {
        eprintln!("ヒューリスティック・消去順序の指定は 1 つまでです");
        process::exit(1);
    }
    opts
}

fn parse_order(s: &str) -> Vec<u32> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<u32>().unwrap_or_else(|_| {
                eprintln!("消去順序を解析できません: {}", t);
                process::exit(1);
            })
        })
        .collect()
}

/// 消去順序が 0..n の置換であることを確認する
fn validate_order(order: &[u32], n: usize) {
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    let expected: Vec<u32> = (0..n as u32).collect();
    if sorted != expected {
        eprintln!("消去順序が 0..{} の置換になっていません", n);
        process::exit(1);
    }
}

fn read_input(input: &Option<String>) -> String {
    match input.as_deref() {
        None | Some("-") => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).unwrap_or_else(|e| {
                eprintln!("標準入力を読めません: {}", e);
                process::exit(1);
            });
            s
        }
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ファイル {} を読めません: {}", path, e);
            process::exit(1);
        }),
    }
}

fn load_graph(opts: &Options) -> Graph {
    let text = read_input(&opts.input);
    let g = parse_graph(&text).unwrap_or_else(|e| {
        eprintln!("グラフを解析できません: {}", e);
        process::exit(1);
    });
    if g.num_vertices() == 0 {
        eprintln!("グラフが空です");
        process::exit(1);
    }
    if !g.is_connected() {
        eprintln!("入力グラフが連結ではありません。連結な入力が必要です");
        process::exit(1);
    }
    eprintln!(
        "頂点 {} 個、辺 {} 本のグラフ",
        g.num_vertices(),
        g.num_edges()
    );
    g
}

fn elimination_order(opts: &Options, g: &Graph) -> Vec<u32> {
    match &opts.order {
        Some(order) => {
            validate_order(order, g.num_vertices());
            order.clone()
        }
        None => match opts.heuristic {
            Heuristic::Degree => greedy_degree_order(g),
            Heuristic::FillIn => greedy_fillin_order(g),
            Heuristic::LocalDegree => greedy_local_degree_order(g),
            Heuristic::LocalFillIn => greedy_local_fillin_order(g),
        },
    }
}

fn build_tree(opts: &Options, g: &Graph) -> Bag {
    let order = elimination_order(opts, g);
    let td = build_tree_decomposition(&order, g);
    if opts.print_tree {
        eprintln!("消去順序: {:?}", order);
        eprintln!("木分解: {}", td);
    }
    eprintln!("木分解の幅 {} （バッグ {} 個）", td.width(), td.bag_count());
    td
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "compute" => cmd_compute(&args[2..]),
        "tree" => cmd_tree(&args[2..]),
        "verify" => cmd_verify(&args[2..]),
        "-h" | "--help" => print_usage(),
        _ => {
            eprintln!("不明なコマンド: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn cmd_compute(args: &[String]) {
    let opts = parse_options(args);
    let g = load_graph(&opts);
    let td = build_tree(&opts, &g);

    let timer = Instant::now();
    let raw = if opts.direct {
        transfer_direct(&td)
    } else {
        chinese_remainder(&td)
    };
    let result = to_directed_counts(raw);
    let elapsed = timer.elapsed();

    println!("{}", result);
    eprintln!("計算時間 = {:?}", elapsed);
}

fn cmd_tree(args: &[String]) {
    let mut opts = parse_options(args);
    opts.print_tree = true;
    let g = load_graph(&opts);
    build_tree(&opts, &g);
}

fn cmd_verify(args: &[String]) {
    let opts = parse_options(args);
    let g = load_graph(&opts);
    let td = build_tree(&opts, &g);

    let timer = Instant::now();
    let crt = to_directed_counts(chinese_remainder(&td));
    let direct = to_directed_counts(transfer_direct(&td));
    let brute = count_paths_brute(&g);
    let elapsed = timer.elapsed();

    eprintln!("CRT     : {}", crt);
    eprintln!("直接計算: {}", direct);
    eprintln!("全探索  : {}", brute);
    eprintln!("計算時間 = {:?}", elapsed);

    if crt == direct && crt == brute {
        println!("一致: {}", crt);
    } else {
        println!("不一致");
        process::exit(1);
    }
}
