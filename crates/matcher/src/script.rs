//! Simplified / Traditional Chinese conversion.
//!
//! The engine only ever talks to [`ScriptConverter`]. The default
//! [`CharTableConverter`] is a one-to-one character table; characters with a
//! one-to-many mapping (后/後, 范/範, 台/臺, 钟/鐘/鍾 ...) are not in the
//! table and pass through unchanged.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

pub trait ScriptConverter {
    fn to_traditional(&self, s: &str) -> String;
    fn to_simplified(&self, s: &str) -> String;
}

impl<T: ScriptConverter + ?Sized> ScriptConverter for &T {
    fn to_traditional(&self, s: &str) -> String {
        (**self).to_traditional(s)
    }

    fn to_simplified(&self, s: &str) -> String {
        (**self).to_simplified(s)
    }
}

/// Converter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl ScriptConverter for IdentityConverter {
    fn to_traditional(&self, s: &str) -> String {
        s.to_string()
    }

    fn to_simplified(&self, s: &str) -> String {
        s.to_string()
    }
}

/// Character-table converter.
#[derive(Debug, Clone)]
pub struct CharTableConverter {
    tables: Cow<'static, Tables>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    s2t: HashMap<char, char>,
    t2s: HashMap<char, char>,
}

impl Tables {
    fn from_pairs<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        let mut tables = Tables::default();
        for (simplified, traditional) in pairs {
            if simplified == traditional {
                continue;
            }
            tables.s2t.insert(simplified, traditional);
            tables.t2s.insert(traditional, simplified);
        }
        tables
    }
}

static BUILTIN: OnceLock<Tables> = OnceLock::new();

fn builtin_tables() -> &'static Tables {
    BUILTIN.get_or_init(|| Tables::from_pairs(builtin_pairs()))
}

impl CharTableConverter {
    /// Converter backed by the built-in table.
    pub fn builtin() -> Self {
        Self {
            tables: Cow::Borrowed(builtin_tables()),
        }
    }

    /// Converter backed by an explicit `(simplified, traditional)` list.
    pub fn from_pairs<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        Self {
            tables: Cow::Owned(Tables::from_pairs(pairs)),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.s2t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.s2t.is_empty()
    }
}

impl Default for CharTableConverter {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScriptConverter for CharTableConverter {
    fn to_traditional(&self, s: &str) -> String {
        map_chars(s, &self.tables.s2t)
    }

    fn to_simplified(&self, s: &str) -> String {
        map_chars(s, &self.tables.t2s)
    }
}

fn map_chars(s: &str, table: &HashMap<char, char>) -> String {
    s.chars().map(|c| *table.get(&c).unwrap_or(&c)).collect()
}

fn builtin_pairs() -> impl Iterator<Item = (char, char)> {
    BUILTIN_PAIRS.split_whitespace().filter_map(|pair| {
        let mut chars = pair.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(s), Some(t), None) => Some((s, t)),
            _ => None,
        }
    })
}

// Simplified character followed by its Traditional form.
const BUILTIN_PAIRS: &str = "
万萬 与與 专專 业業 丛叢 东東 丝絲 两兩 严嚴 丧喪 个個 丰豐 临臨 丽麗 举舉 乐樂 乔喬
习習 乡鄉 书書 买買 乱亂 争爭 亏虧 亚亞 产產 亩畝 亲親 亿億 仅僅 从從 仑崙 仓倉 仪儀
们們 价價 众眾 优優 伙夥 会會 伟偉 传傳 伤傷 伦倫 体體 佣傭 侠俠 侣侶 侦偵 侨僑 债債
倾傾 儿兒 兰蘭 关關 兴興 养養 兽獸 冈岡 写寫 军軍 农農 冯馮 冲衝 决決 况況 冻凍 净淨
凉涼 减減 凤鳳 凭憑 凯凱 击擊 则則 刚剛 创創 刘劉 剑劍 剧劇 劝勸 办辦 务務 动動 励勵
劲勁 劳勞 势勢 勋勳 区區 医醫 华華 协協 单單 卖賣 卢盧 卫衛 却卻 厂廠 厅廳 历歷 厉厲
压壓 厦廈 县縣 参參 双雙 发發 变變 叙敘 叹嘆 号號 吕呂 吴吳 员員 咏詠 响響 哗嘩 唤喚
啬嗇 啸嘯 团團 园園 围圍 国國 图圖 圆圓 圣聖 场場 坚堅 坛壇 垒壘 执執 扩擴 扫掃 扬揚
扰擾 抚撫 护護 报報 担擔 拟擬 拥擁 拦攔 择擇 挂掛 挚摯 挤擠 挥揮 损損 换換 据據 掳擄
携攜 摄攝 摆擺 摇搖 敌敵 数數 斋齋 断斷 无無 旧舊 时時 旷曠 晋晉 晓曉 显顯 暂暫 术術
机機 杀殺 杂雜 权權 条條 来來 杨楊 极極 构構 枪槍 柜櫃 标標 栋棟 栏欄 树樹 样樣 桥橋
档檔 梦夢 检檢 楼樓 欢歡 欧歐 残殘 毕畢 气氣 汇匯 汉漢 汤湯 沟溝 没沒 沧滄 沪滬 泪淚
泽澤 洁潔 洒灑 浅淺 浇澆 浊濁 测測 济濟 浑渾 浓濃 涛濤 涌湧 润潤 涨漲 渊淵 渔漁 渐漸
温溫 湾灣 湿濕 满滿 滚滾 滨濱 滩灘 潜潛 澜瀾 灯燈 灾災 灵靈 灿燦 炉爐 点點 炼煉 烂爛
烛燭 烟煙 烦煩 烧燒 热熱 焕煥 爱愛 爷爺 牵牽 状狀 犹猶 狮獅 独獨 狱獄 猎獵 猪豬 猫貓
献獻 玛瑪 玮瑋 环環 现現 珑瓏 琼瓊 瑶瑤 电電 画畫 畅暢 疗療 监監 盐鹽 盖蓋 盗盜 盘盤
矫矯 矿礦 码碼 砖磚 础礎 硕碩 确確 碍礙 礼禮 祯禎 祷禱 祸禍 离離 禅禪 种種 积積 称稱
税稅 稣穌 稳穩 穷窮 窃竊 竖豎 竞競 笔筆 笋筍 笼籠 筑築 筹籌 签簽 简簡 类類 粮糧 紧緊
纠糾 红紅 纤纖 约約 级級 纪紀 纬緯 纯純 纲綱 纳納 纵縱 纷紛 纸紙 纹紋 纺紡 纽紐 线線
练練 组組 细細 织織 终終 绅紳 绍紹 经經 绕繞 绘繪 给給 络絡 绝絕 统統 继繼 绩績 绪緒
续續 绳繩 维維 绵綿 综綜 绿綠 缅緬 缓緩 编編 缘緣 缠纏 缩縮 缴繳 网網 罗羅 罚罰 罢罷
耸聳 耻恥 聂聶 职職 联聯 聪聰 肃肅 肤膚 肿腫 胆膽 胜勝 胶膠 脉脈 脑腦 脚腳 脱脫 腊臘
舆輿 舰艦 舱艙 艰艱 艳豔 艺藝 节節 芦蘆 苍蒼 苏蘇 苹蘋 荐薦 荡蕩 荣榮 药藥 莱萊 莲蓮
获獲 萧蕭 萨薩 营營 蓝藍 虑慮 虚虛 虫蟲 虽雖 虾蝦 蚁蟻 蛮蠻 补補 衬襯 袜襪 袭襲 装裝
见見 观觀 规規 视視 览覽 觉覺 触觸 誉譽 计計 订訂 认認 讨討 让讓 训訓 议議 讯訊 记記
讲講 讽諷 设設 访訪 证證 评評 识識 诉訴 诊診 词詞 译譯 试試 诗詩 诚誠 话話 诞誕 询詢
该該 详詳 语語 误誤 诱誘 说說 请請 诸諸 诺諾 读讀 课課 谁誰 调調 谅諒 谈談 谊誼 谋謀
谎謊 谐諧 谓謂 谜謎 谢謝 谦謙 谨謹 谱譜 贝貝 贞貞 负負 贡貢 财財 责責 贤賢 败敗 账賬
货貨 质質 贩販 贪貪 贫貧 购購 贯貫 贴貼 贵貴 贷貸 贸貿 费費 贺賀 贼賊 资資 赋賦 赌賭
赏賞 赐賜 赔賠 赖賴 赚賺 赛賽 赞贊 赠贈 赵趙 赶趕 趋趨 跃躍 践踐 踪蹤 躯軀 车車 轨軌
轩軒 转轉 轮輪 软軟 轰轟 轻輕 载載 较較 辆輛 辈輩 辉輝 输輸 辖轄 辞辭 边邊 辽遼 达達
迁遷 过過 迈邁 运運 还還 这這 进進 远遠 违違 连連 迟遲 适適 选選 逊遜 递遞 逻邏 遗遺
邓鄧 邝鄺 邮郵 邹鄒 邻鄰 郑鄭 酝醞 酱醬 酿釀 释釋 鉴鑒 针針 钓釣 钞鈔 钢鋼 钥鑰 钦欽
钧鈞 钩鉤 钱錢 钻鑽 铁鐵 铃鈴 铅鉛 铜銅 铭銘 铺鋪 链鏈 销銷 锁鎖 锅鍋 锋鋒 锐銳 错錯
锡錫 锦錦 键鍵 锻鍛 镇鎮 镜鏡 长長 门門 闪閃 闭閉 问問 闯闖 闲閒 间間 闷悶 闸閘 闹鬧
闻聞 阁閣 阅閱 阔闊 队隊 阳陽 阴陰 阵陣 阶階 际際 陆陸 陈陳 陕陝 险險 随隨 隐隱 隶隸
难難 雾霧 静靜 韦韋 韩韓 韵韻 页頁 顶頂 项項 顺順 须須 顽頑 顾顧 顿頓 颁頒 颂頌 预預
领領 颇頗 频頻 颖穎 颗顆 题題 额額 颜顏 风風 飞飛 饥飢 饭飯 饮飲 饰飾 饱飽 饶饒 馆館
马馬 驰馳 驱驅 驶駛 驻駐 驾駕 骂罵 骄驕 验驗 骏駿 骑騎 骗騙 骤驟 鱼魚 鲁魯 鲍鮑 鲜鮮
鲸鯨 鸟鳥 鸡雞 鸣鳴 鸭鴨 鸿鴻 鹅鵝 鹏鵬 鹤鶴 鹰鷹 麦麥 黄黃 齐齊 齿齒 龙龍 龚龔 龟龜
启啟 紧緊 宁寧 实實 宝寶 宠寵 审審 宫宮 宽寬 宾賓 对對 寻尋 导導 将將 尔爾 尽盡 层層
属屬 岁歲 岛島 岭嶺 币幣 师師 帅帥 帐帳 带帶 帮幫 庆慶 库庫 应應 庙廟 废廢 开開 异異
张張 弯彎 录錄 彻徹 忆憶 忧憂 怀懷 态態 总總 恋戀 恶惡 悦悅 惊驚 战戰 户戶 兑兌 团團
蔼藹 妇婦 妈媽 姗姍 娄婁 娱娛 孙孫 学學 宪憲 赈賑 筛篩 银銀 贾賈 钰鈺
俭儉 俩倆 伞傘 陨隕 凛凜 浏瀏 荧熒 莹瑩 萤螢 锺鍾
为為 腾騰 许許 叶葉 蒋蔣 谭譚 庄莊 阎閻 蚂螞 闫閆 骆駱 闵閔 缪繆 邬鄔 庞龐 归歸 尧堯 钮鈕
銮鑾 贲賁 义義 乌烏 伪偽 侧側 侩儈 侬儂 俪儷 偿償 储儲 党黨 兹茲 册冊 删刪 剂劑 剥剝 匀勻
卧臥 厌厭 厕廁 厢廂 厨廚 吓嚇 吗嗎 吨噸 听聽 呕嘔 呜嗚 哑啞 哟喲 唛嘜 喷噴 嘱囑 坏壞 块塊
坝壩 坞塢 坟墳 坠墜 垄壟 垦墾 垫墊 墙牆 壮壯 声聲 壳殼 壶壺 处處 备備 够夠 头頭 夹夾 夺奪
奋奮 奖獎 妆妝 娅婭 娇嬌 婴嬰 婵嬋 婶嬸 嫒嬡 寝寢 寿壽 尘塵 尝嘗 尴尷 屉屜 届屆 屡屢 屿嶼
岂豈 岗崗 岚嵐 峡峽 峥崢 峦巒 崂嶗 嵘嶸 巩鞏 帜幟 帼幗 广廣 庐廬 弃棄 弥彌 弹彈 彦彥 径徑
恳懇 恼惱 悬懸 悯憫 惧懼 惨慘 惩懲 惭慚 惯慣 愤憤 慑懾 懒懶 戏戲 扑撲 抛拋 抢搶 拢攏 拣揀
拧擰 拨撥 挡擋 挣掙 捞撈 捡撿 捣搗 掷擲 揽攬 搀攙 搁擱 搂摟 搅攪 摊攤 撑撐 敛斂 斩斬 昼晝
晒曬 晔曄 晕暈 晖暉 杰傑 枢樞 枣棗 枫楓 柠檸 栈棧 桦樺 桨槳 桩樁 椭橢 榄欖 榈櫚 榉櫸 槛檻
槟檳 横橫 樱櫻 橱櫥 歼殲 殡殯 殴毆 毙斃 氢氫 汹洶 沥瀝 沦淪 泞濘 泻瀉 泼潑 洼窪 浆漿 浔潯
涝澇 涟漣 涡渦 涤滌 涩澀 渍漬 渗滲 溃潰 溅濺 滞滯 滤濾 滥濫 潇瀟 潍濰 濒瀕 灏灝 灭滅 炜煒
炽熾 烁爍 烨燁 烫燙 焘燾 牺犧 犊犢 狭狹 猕獼 玺璽 珐琺 珲琿 琐瑣 瑷璦 璎瓔 瓒瓚 畴疇 疮瘡
疯瘋 痒癢 瘫癱 瘾癮 皑皚 皱皺 盏盞 睁睜 瞒瞞 矶磯 砚硯 砺礪 砾礫 禄祿 禀稟 秃禿 窍竅 窑窯
窜竄 窝窩 窥窺 窦竇 笃篤 笺箋 筝箏 箩籮 箫簫 篮籃 篱籬 籁籟 粤粵 粪糞 结結 绑綁 绒絨 绚絢
绢絹 绣繡 绥綏 绫綾 绮綺 绰綽 绷繃 绸綢 绽綻 缀綴 缆纜 缉緝 缎緞 缔締 缕縷 缚縛 缝縫 缤繽
缨纓 缭繚 缮繕 羁羈 翘翹 聋聾 肠腸 肾腎 胀脹 胁脅 脐臍 脸臉 腻膩 芜蕪 苇葦 茎莖 茧繭 荚莢
荞蕎 荟薈 荤葷 荫蔭 莺鶯 萝蘿 萦縈 葱蔥 蔷薔 蕴蘊 虏虜 蚀蝕 蚕蠶 蛰蟄 蜗蝸 蝇蠅 蝉蟬 衔銜
袄襖 裤褲 觅覓 誊謄 讥譏 讳諱 讶訝 论論 讼訟 诀訣 诈詐 诏詔 诠詮 诡詭 诣詣 诫誡 诬誣 诵誦
谍諜 谒謁 谕諭 谚諺 谣謠 谤謗 谬謬 谴譴 贬貶 贮貯 贰貳 贱賤 贿賄 赁賃 赂賂 赃贓 赎贖 赘贅
赡贍 赢贏 赣贛 跷蹺 踊踴 轴軸 轿轎 辅輔 辐輻 辑輯 辕轅 辗輾 辙轍 辩辯 辫辮 遥遙 邺鄴 郦酈
郸鄲 钉釘 钙鈣 钛鈦 钝鈍 钳鉗 钵缽 铝鋁 铸鑄 锈鏽 锌鋅 锚錨 锣鑼 锤錘 锥錐 锭錠 锯鋸 锹鍬
镀鍍 镁鎂 镍鎳 镑鎊 镖鏢 镰鐮 镶鑲 闰閏 闺閨 闽閩 阀閥 阐闡 陇隴 隽雋 雏雛 霭靄 靓靚 韧韌
韬韜 顷頃 颈頸 颐頤 颠顛 颤顫 飘飄 饲飼 饵餌 饼餅 饿餓 馅餡 馈饋 驯馴 驳駁 驴驢 驹駒 驼駝
骇駭 骚騷 鲤鯉 鲨鯊 鳄鱷 鸥鷗 鸦鴉 鸽鴿 鹃鵑 鹊鵲 鹦鸚 鹭鷺 龄齡 龛龕 鸳鴛 鸯鴦 恺愷 玑璣
琏璉 鲲鯤
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pairs_are_well_formed() {
        for token in BUILTIN_PAIRS.split_whitespace() {
            assert_eq!(token.chars().count(), 2, "malformed pair {token:?}");
        }
        assert!(CharTableConverter::builtin().len() > 1100);
    }

    #[test]
    fn tables_are_inverse() {
        let conv = CharTableConverter::builtin();
        for (s, t) in builtin_pairs() {
            assert_eq!(conv.tables.s2t.get(&s), Some(&t), "{s}{t}");
            assert_eq!(conv.tables.t2s.get(&t), Some(&s), "{s}{t}");
        }
    }

    #[test]
    fn common_donor_names_convert() {
        let conv = CharTableConverter::builtin();
        assert_eq!(conv.to_traditional("华为"), "華為");
        assert_eq!(conv.to_traditional("腾讯"), "騰訊");
        assert_eq!(conv.to_traditional("许家印"), "許家印");
        assert_eq!(conv.to_traditional("叶刘淑仪"), "葉劉淑儀");
        assert_eq!(conv.to_traditional("蒋丽芸"), "蔣麗芸");
        assert_eq!(conv.to_simplified("譚詠麟"), "谭咏麟");
        assert_eq!(conv.to_simplified("莊閻螞"), "庄阎蚂");
    }

    #[test]
    fn converts_both_directions() {
        let conv = CharTableConverter::builtin();
        assert_eq!(conv.to_traditional("刘亦菲"), "劉亦菲");
        assert_eq!(conv.to_simplified("中國宏橋"), "中国宏桥");
        assert_eq!(conv.to_traditional("东亚银行"), "東亞銀行");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        let conv = CharTableConverter::builtin();
        assert_eq!(conv.to_traditional("HSBC 2024"), "HSBC 2024");
        assert_eq!(conv.to_simplified("后"), "后");
        assert_eq!(conv.to_traditional(""), "");
    }

    #[test]
    fn custom_table_replaces_builtin() {
        let conv = CharTableConverter::from_pairs([('刘', '劉')]);
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.to_traditional("刘国"), "劉国");
        assert_eq!(conv.to_simplified("劉國"), "刘國");
    }

    #[test]
    fn identity_converter_is_noop() {
        assert_eq!(IdentityConverter.to_traditional("刘"), "刘");
        assert_eq!(IdentityConverter.to_simplified("劉"), "劉");
    }
}
