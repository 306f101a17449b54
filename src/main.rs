//! 交互式碰撞概率模拟
//!
//! 依次询问哈希位数与是否使用Cuckoo哈希，运行蒙特卡洛模拟，
//! 按元素数升序向标准输出打印 `<元素数> <概率>`。
//!
//! 环境变量 `CUCKOO_SIM_TRIALS` 覆盖试验次数，`CUCKOO_SIM_SEED` 固定随机种子。

use std::{
    error::Error,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use cuckoo_hashing::{map::MAX_BITS, SimulationConfig, Simulator, StrategyKind};

const TRIALS_ENV: &str = "CUCKOO_SIM_TRIALS";
const SEED_ENV: &str = "CUCKOO_SIM_SEED";

/// 读取一行，输入结束时报错
fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "输入已结束"));
    }
    Ok(line.trim().to_string())
}

/// 询问哈希位数，直到得到 (0, 32] 内的整数
fn prompt_bits<R: BufRead, W: Write, E: Write>(
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> io::Result<u32> {
    loop {
        write!(out, "Number of hash bits (hash table size 2^bits): ")?;
        out.flush()?;
        match read_line(input)?.parse::<u32>() {
            Ok(bits) if bits > 0 && bits <= MAX_BITS => return Ok(bits),
            _ => writeln!(err, "Please enter integer in interval (0, {MAX_BITS}]")?,
        }
    }
}

/// 询问是否使用Cuckoo哈希，只看首字符
fn prompt_cuckoo<R: BufRead, W: Write, E: Write>(
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> io::Result<bool> {
    loop {
        write!(out, "Use Cuckoo hashing (y/n)? ")?;
        out.flush()?;
        match read_line(input)?.chars().next() {
            Some('y' | 'Y') => return Ok(true),
            Some('n' | 'N') => return Ok(false),
            _ => writeln!(err, "Please enter 'y' or 'n'")?,
        }
    }
}

/// 读取环境变量覆盖项
fn env_override<T>(name: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: Error + 'static,
{
    match std::env::var(name) {
        Ok(raw) => Ok(Some(raw.trim().parse().map_err(|e| {
            format!("环境变量 {name}={raw} 无法解析: {e}")
        })?)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cuckoo_hashing::log_error!("cuckoo-sim failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// 读取输入、运行模拟并输出报告
fn run() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let bits = prompt_bits(&mut input, &mut stdout, &mut stderr)?;
    let cuckoo = prompt_cuckoo(&mut input, &mut stdout, &mut stderr)?;

    let mut config = SimulationConfig::new(bits, StrategyKind::from_cuckoo_flag(cuckoo));
    if let Some(trials) = env_override(TRIALS_ENV)? {
        config = config.with_trials(trials);
    }
    if let Some(seed) = env_override(SEED_ENV)? {
        config = config.with_seed(seed);
    }

    let simulator = Simulator::new(config)?;
    eprint!("Number of elements: ");
    let report = simulator.run_with_progress(|elements, _| eprint!("[{elements}] "))?;
    eprintln!();

    let mut out = stdout.lock();
    write!(out, "{report}")?;
    out.flush()?;
    Ok(())
}
