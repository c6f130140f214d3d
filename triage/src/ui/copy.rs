// User-facing text of the consultation desk.

pub const PAGE_TITLE: &str = "医院多智能体问诊";
pub const LOGS_PAGE_TITLE: &str = "交互日志浏览";
pub const PAGE_LANG: &str = "zh-CN";

pub const CONNECTING: &str = "正在连接接待员...";
pub const THINKING: &str = "正在处理您的消息...";

pub const PLACEHOLDER_READY: &str = "请输入您的回复...";
pub const PLACEHOLDER_WAIT: &str = "请稍候...";
pub const PLACEHOLDER_PRESCRIPTION: &str = "如有关于处方或用药的问题，请在此输入...";
pub const PLACEHOLDER_ENDED: &str = "本次咨询已结束。";
pub const PLACEHOLDER_NOT_STARTED: &str = "咨询未能开始，请刷新页面重试。";
pub const SEND: &str = "发送";

pub const START_FAILED: &str = "无法开始咨询，请稍后刷新页面重试。";
pub const REQUEST_FAILED: &str = "发送消息失败，请重试：";

pub const CLOSING_COMPLETED: &str = "本次咨询已结束，祝您早日康复。如需新的咨询，请刷新页面。";
pub const CLOSING_REJECTED: &str = "处方未通过药剂师审核，本次咨询已结束。请刷新页面重新咨询。";
pub const CLOSING_ERROR: &str = "咨询因错误已终止，请刷新页面后重试。";
/// Markers that tell a server message already announces the end.
pub const TERMINATION_MARKERS: [&str; 2] = ["结束", "终止"];

pub const DIAGNOSIS_HEADING: &str = "诊断结果";
pub const CONDITION_LABEL: &str = "诊断：";
pub const SEVERITY_LABEL: &str = "严重程度：";
pub const EXPLANATION_LABEL: &str = "说明：";
pub const TESTS_LABEL: &str = "建议检查：";

pub const PRESCRIPTION_HEADING: &str = "处方";
pub const AS_DIRECTED: &str = "遵医嘱";
pub const INSTRUCTIONS_LABEL: &str = "用药说明：";
pub const NOTES_LABEL: &str = "备注：";
pub const PHARMACIST_NOTES_LABEL: &str = "药剂师意见：";
pub const NO_PRESCRIPTION: &str = "暂无有效处方。";

pub const LOG_HEADING: &str = "交互记录";
pub const LOG_EMPTY: &str = "暂无记录。";
pub const LOG_INVALID: &str = "日志数据格式无效。";
pub const LOG_ALL_FILTERED: &str = "暂无有效记录。";
pub const LOG_ENTRY_BROKEN: &str = "处理日志条目时出错";

pub const LOG_LIST_HEADING: &str = "日志文件";
pub const LOG_LIST_EMPTY: &str = "暂无日志文件。";
pub const LOG_LIST_FAILED: &str = "加载日志列表失败：";
pub const LOG_DETAIL_HINT: &str = "请选择一个日志文件查看详情。";
pub const LOG_DETAIL_FAILED: &str = "加载日志内容失败：";
pub const LOG_ID_COLUMN: &str = "咨询编号";
pub const LOG_TIME_COLUMN: &str = "修改时间";
pub const LOG_SIZE_COLUMN: &str = "大小";

pub const PAGE_BROKEN: &str = "页面加载失败，缺少必要的页面元素：";
